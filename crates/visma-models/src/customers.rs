//! Customer-registry resources.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use visma_core::{
	ApiModel, ClientError, Error, FieldDescriptor, Model, ModelMeta, Operation, Result,
};

fn default_true() -> bool {
	true
}

/// A term of payment that can be set on customers and invoices.
///
/// Read-only in the API: the terms are maintained in eAccounting itself,
/// the client only lists them and references them by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsOfPayment {
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	#[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(rename = "NameEnglish", default, skip_serializing_if = "Option::is_none")]
	pub name_english: Option<String>,
	#[serde(rename = "NumberOfDays", default, skip_serializing_if = "Option::is_none")]
	pub number_of_days: Option<i64>,
	#[serde(
		rename = "TermsOfPaymentTypeId",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub terms_of_payment_type_id: Option<i64>,
	#[serde(
		rename = "TermsOfPaymentTypeText",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub terms_of_payment_type_text: Option<String>,
	#[serde(
		rename = "AvailableForSales",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub available_for_sales: Option<bool>,
	#[serde(
		rename = "AvailableForPurchase",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub available_for_purchase: Option<bool>,
}

static TERMS_OF_PAYMENT_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("TermsOfPayment")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(FieldDescriptor::string("name", "Name"))
		.field(FieldDescriptor::string("name_english", "NameEnglish"))
		.field(FieldDescriptor::integer("number_of_days", "NumberOfDays"))
		.field(FieldDescriptor::integer(
			"terms_of_payment_type_id",
			"TermsOfPaymentTypeId",
		))
		.field(
			FieldDescriptor::string("terms_of_payment_type_text", "TermsOfPaymentTypeText")
				.nullable(),
		)
		.field(FieldDescriptor::boolean("available_for_sales", "AvailableForSales").nullable())
		.field(FieldDescriptor::boolean(
			"available_for_purchase",
			"AvailableForPurchase",
		))
		.endpoint("/termsofpayments", &[Operation::List, Operation::Get])
		.paginated()
		.build()
});

impl Model for TermsOfPayment {
	fn meta() -> &'static ModelMeta {
		&TERMS_OF_PAYMENT_META
	}
}

impl ApiModel for TermsOfPayment {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

/// A customer in the eAccounting customer registry.
///
/// `name`, `invoice_city`, `invoice_postal_code` and
/// `terms_of_payment_id` are required on creation; everything marked
/// read-only below is filled in by the API. Use [`Customer::builder`] to
/// construct one with the required fields checked up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
	/// Assigned by eAccounting on creation.
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	/// Generated by the API when not supplied.
	#[serde(rename = "CustomerNumber", default, skip_serializing_if = "Option::is_none")]
	pub customer_number: Option<String>,
	/// Social number for private persons, organisation number otherwise.
	#[serde(
		rename = "CorporateIdentityNumber",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub corporate_identity_number: Option<String>,
	#[serde(
		rename = "ContactPersonEmail",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub contact_person_email: Option<String>,
	#[serde(
		rename = "ContactPersonName",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub contact_person_name: Option<String>,
	/// Defaults to the company currency when left out.
	#[serde(rename = "CurrencyCode", default, skip_serializing_if = "Option::is_none")]
	pub currency_code: Option<String>,
	/// Used when sending invoices.
	#[serde(rename = "EmailAddress", default, skip_serializing_if = "Option::is_none")]
	pub email_address: Option<String>,
	#[serde(rename = "InvoiceAddress1", default, skip_serializing_if = "Option::is_none")]
	pub invoice_address1: Option<String>,
	#[serde(rename = "InvoiceAddress2", default, skip_serializing_if = "Option::is_none")]
	pub invoice_address2: Option<String>,
	#[serde(rename = "InvoiceCity")]
	pub invoice_city: String,
	#[serde(
		rename = "InvoiceCountryCode",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub invoice_country_code: Option<String>,
	#[serde(rename = "InvoicePostalCode")]
	pub invoice_postal_code: String,
	/// Reference into `/deliverymethods`.
	#[serde(
		rename = "DeliveryMethodId",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub delivery_method_id: Option<Uuid>,
	/// Reference into `/deliveryterms`.
	#[serde(rename = "DeliveryTermId", default, skip_serializing_if = "Option::is_none")]
	pub delivery_term_id: Option<Uuid>,
	/// The account payments are registered on.
	#[serde(rename = "PayToAccountId", default, skip_serializing_if = "Option::is_none")]
	pub pay_to_account_id: Option<Uuid>,
	#[serde(rename = "Name")]
	pub name: String,
	#[serde(rename = "Note", default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// When true, `vat_number` must be set as well.
	#[serde(rename = "ReverseChargeOnConstructionServices", default)]
	pub reverse_charge_on_construction_services: bool,
	#[serde(rename = "MobilePhone", default, skip_serializing_if = "Option::is_none")]
	pub mobile_phone: Option<String>,
	#[serde(rename = "Telephone", default, skip_serializing_if = "Option::is_none")]
	pub telephone: Option<String>,
	/// Reference into `/termsofpayments`.
	#[serde(rename = "TermsOfPaymentId")]
	pub terms_of_payment_id: Uuid,
	/// Expanded by the API on reads.
	#[serde(rename = "TermsOfPayment", default, skip_serializing_if = "Option::is_none")]
	pub terms_of_payment: Option<TermsOfPayment>,
	/// Two-letter country code followed by 8-12 digits.
	#[serde(rename = "VatNumber", default, skip_serializing_if = "Option::is_none")]
	pub vat_number: Option<String>,
	#[serde(rename = "WwwAddress", default, skip_serializing_if = "Option::is_none")]
	pub www_address: Option<String>,
	#[serde(rename = "LastInvoiceDate", default, skip_serializing_if = "Option::is_none")]
	pub last_invoice_date: Option<NaiveDateTime>,
	#[serde(rename = "IsPrivatePerson", default)]
	pub is_private_person: bool,
	/// Customer-wide discount, e.g. `0.1` for 10 %.
	#[serde(rename = "DiscountPercentage", default)]
	pub discount_percentage: f64,
	#[serde(rename = "ChangedUtc", default, skip_serializing_if = "Option::is_none")]
	pub changed_utc: Option<NaiveDateTime>,
	#[serde(rename = "IsActive", default = "default_true")]
	pub is_active: bool,
	#[serde(rename = "EmailAddresses", default, skip_serializing_if = "Option::is_none")]
	pub email_addresses: Option<Vec<String>>,
}

static CUSTOMER_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("Customer")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(
			FieldDescriptor::string("customer_number", "CustomerNumber")
				.nullable()
				.max_length(20),
		)
		.field(
			FieldDescriptor::string("corporate_identity_number", "CorporateIdentityNumber")
				.nullable()
				.max_length(20),
		)
		.field(
			FieldDescriptor::string("contact_person_email", "ContactPersonEmail")
				.nullable()
				.max_length(255),
		)
		.field(
			FieldDescriptor::string("contact_person_name", "ContactPersonName")
				.nullable()
				.max_length(100),
		)
		.field(
			FieldDescriptor::string("currency_code", "CurrencyCode")
				.nullable()
				.max_length(3),
		)
		.field(
			FieldDescriptor::string("email_address", "EmailAddress")
				.nullable()
				.max_length(255),
		)
		.field(
			FieldDescriptor::string("invoice_address1", "InvoiceAddress1")
				.nullable()
				.max_length(50),
		)
		.field(
			FieldDescriptor::string("invoice_address2", "InvoiceAddress2")
				.nullable()
				.max_length(50),
		)
		.field(
			FieldDescriptor::string("invoice_city", "InvoiceCity")
				.required()
				.max_length(50),
		)
		.field(
			FieldDescriptor::string("invoice_country_code", "InvoiceCountryCode")
				.nullable()
				.max_length(2),
		)
		.field(
			FieldDescriptor::string("invoice_postal_code", "InvoicePostalCode")
				.required()
				.max_length(10),
		)
		.field(FieldDescriptor::uuid("delivery_method_id", "DeliveryMethodId").nullable())
		.field(FieldDescriptor::uuid("delivery_term_id", "DeliveryTermId").nullable())
		.field(FieldDescriptor::uuid("pay_to_account_id", "PayToAccountId").read_only())
		.field(FieldDescriptor::string("name", "Name").required().max_length(50))
		.field(FieldDescriptor::string("note", "Note").nullable().max_length(4000))
		.field(
			FieldDescriptor::boolean(
				"reverse_charge_on_construction_services",
				"ReverseChargeOnConstructionServices",
			)
			.default_value(false),
		)
		.field(
			FieldDescriptor::string("mobile_phone", "MobilePhone")
				.nullable()
				.max_length(50),
		)
		.field(
			FieldDescriptor::string("telephone", "Telephone")
				.nullable()
				.max_length(50),
		)
		.field(FieldDescriptor::uuid("terms_of_payment_id", "TermsOfPaymentId").required())
		.field(
			FieldDescriptor::nested("terms_of_payment", "TermsOfPayment")
				.nullable()
				.read_only(),
		)
		.field(
			FieldDescriptor::string("vat_number", "VatNumber")
				.nullable()
				.max_length(20),
		)
		.field(
			FieldDescriptor::string("www_address", "WwwAddress")
				.nullable()
				.max_length(255),
		)
		.field(FieldDescriptor::datetime("last_invoice_date", "LastInvoiceDate")
			.nullable()
			.read_only())
		.field(
			FieldDescriptor::boolean("is_private_person", "IsPrivatePerson")
				.required()
				.default_value(false),
		)
		.field(
			FieldDescriptor::number("discount_percentage", "DiscountPercentage")
				.default_value(0)
				.range(0.0, 1.0),
		)
		.field(FieldDescriptor::datetime("changed_utc", "ChangedUtc").read_only())
		.field(
			FieldDescriptor::boolean("is_active", "IsActive")
				.required()
				.default_value(true),
		)
		.field(FieldDescriptor::list("email_addresses", "EmailAddresses").nullable())
		.endpoint(
			"/customers",
			&[
				Operation::List,
				Operation::Get,
				Operation::Create,
				Operation::Update,
				Operation::Delete,
			],
		)
		.paginated()
		.build()
});

impl Model for Customer {
	fn meta() -> &'static ModelMeta {
		&CUSTOMER_META
	}
}

impl ApiModel for Customer {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

impl Customer {
	pub fn builder() -> CustomerBuilder {
		CustomerBuilder::default()
	}
}

/// Builds a [`Customer`] and checks the required fields before the
/// instance exists, so an incomplete customer fails here rather than on
/// `save()`.
#[derive(Debug, Default)]
pub struct CustomerBuilder {
	name: Option<String>,
	invoice_city: Option<String>,
	invoice_postal_code: Option<String>,
	terms_of_payment_id: Option<Uuid>,
	customer_number: Option<String>,
	corporate_identity_number: Option<String>,
	currency_code: Option<String>,
	email_address: Option<String>,
	invoice_address1: Option<String>,
	invoice_country_code: Option<String>,
	note: Option<String>,
	telephone: Option<String>,
	mobile_phone: Option<String>,
	vat_number: Option<String>,
	is_private_person: bool,
	is_active: Option<bool>,
}

impl CustomerBuilder {
	pub fn name(mut self, value: impl Into<String>) -> Self {
		self.name = Some(value.into());
		self
	}

	pub fn invoice_city(mut self, value: impl Into<String>) -> Self {
		self.invoice_city = Some(value.into());
		self
	}

	pub fn invoice_postal_code(mut self, value: impl Into<String>) -> Self {
		self.invoice_postal_code = Some(value.into());
		self
	}

	pub fn terms_of_payment_id(mut self, value: Uuid) -> Self {
		self.terms_of_payment_id = Some(value);
		self
	}

	pub fn customer_number(mut self, value: impl Into<String>) -> Self {
		self.customer_number = Some(value.into());
		self
	}

	pub fn corporate_identity_number(mut self, value: impl Into<String>) -> Self {
		self.corporate_identity_number = Some(value.into());
		self
	}

	pub fn currency_code(mut self, value: impl Into<String>) -> Self {
		self.currency_code = Some(value.into());
		self
	}

	pub fn email_address(mut self, value: impl Into<String>) -> Self {
		self.email_address = Some(value.into());
		self
	}

	pub fn invoice_address1(mut self, value: impl Into<String>) -> Self {
		self.invoice_address1 = Some(value.into());
		self
	}

	pub fn invoice_country_code(mut self, value: impl Into<String>) -> Self {
		self.invoice_country_code = Some(value.into());
		self
	}

	pub fn note(mut self, value: impl Into<String>) -> Self {
		self.note = Some(value.into());
		self
	}

	pub fn telephone(mut self, value: impl Into<String>) -> Self {
		self.telephone = Some(value.into());
		self
	}

	pub fn mobile_phone(mut self, value: impl Into<String>) -> Self {
		self.mobile_phone = Some(value.into());
		self
	}

	pub fn vat_number(mut self, value: impl Into<String>) -> Self {
		self.vat_number = Some(value.into());
		self
	}

	pub fn is_private_person(mut self, value: bool) -> Self {
		self.is_private_person = value;
		self
	}

	pub fn is_active(mut self, value: bool) -> Self {
		self.is_active = Some(value);
		self
	}

	pub fn build(self) -> Result<Customer> {
		let missing = |field: &str| {
			Error::Client(ClientError::MissingField {
				model: Customer::meta().name,
				field: field.to_string(),
			})
		};

		Ok(Customer {
			id: None,
			name: self.name.ok_or_else(|| missing("name"))?,
			invoice_city: self.invoice_city.ok_or_else(|| missing("invoice_city"))?,
			invoice_postal_code: self
				.invoice_postal_code
				.ok_or_else(|| missing("invoice_postal_code"))?,
			terms_of_payment_id: self
				.terms_of_payment_id
				.ok_or_else(|| missing("terms_of_payment_id"))?,
			customer_number: self.customer_number,
			corporate_identity_number: self.corporate_identity_number,
			contact_person_email: None,
			contact_person_name: None,
			currency_code: self.currency_code,
			email_address: self.email_address,
			invoice_address1: self.invoice_address1,
			invoice_address2: None,
			invoice_country_code: self.invoice_country_code,
			delivery_method_id: None,
			delivery_term_id: None,
			pay_to_account_id: None,
			note: self.note,
			reverse_charge_on_construction_services: false,
			mobile_phone: self.mobile_phone,
			telephone: self.telephone,
			terms_of_payment: None,
			vat_number: self.vat_number,
			www_address: None,
			last_invoice_date: None,
			is_private_person: self.is_private_person,
			discount_percentage: 0.0,
			changed_utc: None,
			is_active: self.is_active.unwrap_or(true),
			email_addresses: None,
		})
	}
}
