//! Bookkeeping resources: fiscal years, VAT codes and the company
//! settings singleton.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use visma_core::{ApiModel, FieldDescriptor, Model, ModelMeta, Operation};

/// A fiscal year.
///
/// Years must be created adjacent to an existing one; eAccounting
/// rejects gaps in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYear {
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	#[serde(rename = "StartDate")]
	pub start_date: NaiveDate,
	#[serde(rename = "EndDate")]
	pub end_date: NaiveDate,
	#[serde(
		rename = "IsLockedForAccounting",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub is_locked_for_accounting: Option<bool>,
	/// 0 = invoicing, 1 = cash, 2 = no bookkeeping. Set by the API from
	/// the previous year.
	#[serde(
		rename = "BookkeepingMethod",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub bookkeeping_method: Option<i64>,
}

static FISCAL_YEAR_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("FiscalYear")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(FieldDescriptor::date("start_date", "StartDate").required())
		.field(FieldDescriptor::date("end_date", "EndDate").required())
		.field(
			FieldDescriptor::boolean("is_locked_for_accounting", "IsLockedForAccounting")
				.read_only(),
		)
		.field(
			FieldDescriptor::integer("bookkeeping_method", "BookkeepingMethod")
				.read_only()
				.one_of(&[0, 1, 2]),
		)
		.endpoint(
			"/fiscalyears",
			&[Operation::List, Operation::Create, Operation::Get],
		)
		.paginated()
		.build()
});

impl Model for FiscalYear {
	fn meta() -> &'static ModelMeta {
		&FISCAL_YEAR_META
	}
}

impl ApiModel for FiscalYear {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

impl FiscalYear {
	pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
		Self {
			id: None,
			start_date,
			end_date,
			is_locked_for_accounting: None,
			bookkeeping_method: None,
		}
	}
}

/// The accounts a VAT code books against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedAccounts {
	#[serde(rename = "AccountNumber1", default, skip_serializing_if = "Option::is_none")]
	pub account_number1: Option<i64>,
	#[serde(rename = "AccountNumber2", default, skip_serializing_if = "Option::is_none")]
	pub account_number2: Option<i64>,
	#[serde(rename = "AccountNumber3", default, skip_serializing_if = "Option::is_none")]
	pub account_number3: Option<i64>,
}

static RELATED_ACCOUNTS_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("RelatedAccounts")
		.field(FieldDescriptor::integer("account_number1", "AccountNumber1").nullable())
		.field(FieldDescriptor::integer("account_number2", "AccountNumber2").nullable())
		.field(FieldDescriptor::integer("account_number3", "AccountNumber3").nullable())
		.build()
});

impl Model for RelatedAccounts {
	fn meta() -> &'static ModelMeta {
		&RELATED_ACCOUNTS_META
	}
}

/// A VAT code, e.g. 25 % outgoing VAT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatCode {
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	#[serde(rename = "Code", default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	#[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "VatRate", default, skip_serializing_if = "Option::is_none")]
	pub vat_rate: Option<f64>,
	#[serde(rename = "RelatedAccounts", default, skip_serializing_if = "Option::is_none")]
	pub related_accounts: Option<RelatedAccounts>,
}

static VAT_CODE_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("VatCode")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(FieldDescriptor::string("code", "Code"))
		.field(FieldDescriptor::string("description", "Description"))
		.field(FieldDescriptor::number("vat_rate", "VatRate"))
		.field(FieldDescriptor::nested("related_accounts", "RelatedAccounts").nullable())
		.endpoint("/vatcodes", &[Operation::List, Operation::Get])
		.paginated()
		.build()
});

impl Model for VatCode {
	fn meta() -> &'static ModelMeta {
		&VAT_CODE_META
	}
}

impl ApiModel for VatCode {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

/// The company settings of the current user.
///
/// A singleton: the endpoint answers without a pagination envelope and
/// updates go to the bare resource path, which is why the id is an empty
/// string rather than a GUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
	#[serde(rename = "Id", default)]
	pub id: Option<String>,
	#[serde(rename = "Name")]
	pub name: String,
	#[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(rename = "MobilePhone", default, skip_serializing_if = "Option::is_none")]
	pub mobile_phone: Option<String>,
	#[serde(rename = "Address1", default, skip_serializing_if = "Option::is_none")]
	pub address1: Option<String>,
	#[serde(rename = "Address2", default, skip_serializing_if = "Option::is_none")]
	pub address2: Option<String>,
	#[serde(rename = "CountryCode", default, skip_serializing_if = "Option::is_none")]
	pub country_code: Option<String>,
	#[serde(rename = "PostalCode", default, skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<String>,
	#[serde(rename = "City", default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(rename = "Website", default, skip_serializing_if = "Option::is_none")]
	pub website: Option<String>,
	#[serde(rename = "CurrencyCode", default, skip_serializing_if = "Option::is_none")]
	pub currency_code: Option<String>,
	#[serde(
		rename = "TermsOfPaymentId",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub terms_of_payment_id: Option<Uuid>,
	#[serde(
		rename = "CorporateIdentityNumber",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub corporate_identity_number: Option<String>,
	#[serde(rename = "VatCode", default, skip_serializing_if = "Option::is_none")]
	pub vat_code: Option<String>,
	#[serde(rename = "BankGiro", default, skip_serializing_if = "Option::is_none")]
	pub bank_giro: Option<String>,
	#[serde(
		rename = "ShowPricesExclVatPC",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub show_prices_excl_vat_pc: Option<bool>,
}

static COMPANY_SETTINGS_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("CompanySettings")
		.field(FieldDescriptor::string("id", "Id").nullable())
		.field(FieldDescriptor::string("name", "Name").required())
		.field(FieldDescriptor::string("email", "Email").nullable())
		.field(FieldDescriptor::string("phone", "Phone").nullable())
		.field(FieldDescriptor::string("mobile_phone", "MobilePhone").nullable())
		.field(FieldDescriptor::string("address1", "Address1").nullable())
		.field(FieldDescriptor::string("address2", "Address2").nullable())
		.field(FieldDescriptor::string("country_code", "CountryCode").nullable())
		.field(FieldDescriptor::string("postal_code", "PostalCode").nullable())
		.field(FieldDescriptor::string("city", "City").nullable())
		.field(FieldDescriptor::string("website", "Website").nullable())
		.field(FieldDescriptor::string("currency_code", "CurrencyCode").nullable())
		.field(FieldDescriptor::uuid("terms_of_payment_id", "TermsOfPaymentId").nullable())
		.field(
			FieldDescriptor::string("corporate_identity_number", "CorporateIdentityNumber")
				.read_only(),
		)
		.field(FieldDescriptor::string("vat_code", "VatCode").nullable())
		.field(FieldDescriptor::string("bank_giro", "BankGiro").nullable())
		.field(
			FieldDescriptor::boolean("show_prices_excl_vat_pc", "ShowPricesExclVatPC")
				.read_only(),
		)
		.endpoint("/companysettings", &[Operation::List, Operation::Update])
		.build()
});

impl Model for CompanySettings {
	fn meta() -> &'static ModelMeta {
		&COMPANY_SETTINGS_META
	}
}

impl ApiModel for CompanySettings {
	type Pk = String;

	fn pk(&self) -> Option<&String> {
		self.id.as_ref()
	}
}
