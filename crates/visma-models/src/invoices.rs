//! Customer invoice drafts.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use visma_core::{
	ApiModel, ClientError, Error, FieldDescriptor, Model, ModelMeta, Operation, Result,
};

/// One row on a [`CustomerInvoiceDraft`].
///
/// Rows only ever travel nested inside a draft; they have no endpoint of
/// their own and therefore no manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInvoiceDraftRow {
	/// Sort key within the draft. Duplicates are accepted by the API but
	/// leave the relative order undefined.
	#[serde(rename = "LineNumber")]
	pub line_number: i64,
	/// Required unless `is_text_row` is set.
	#[serde(rename = "ArticleId", default, skip_serializing_if = "Option::is_none")]
	pub article_id: Option<Uuid>,
	/// Filled in from the article registry when left out.
	#[serde(rename = "ArticleNumber", default, skip_serializing_if = "Option::is_none")]
	pub article_number: Option<String>,
	#[serde(rename = "IsTextRow", default)]
	pub is_text_row: bool,
	/// The article name, or the text itself for a text row.
	#[serde(rename = "Text")]
	pub text: String,
	/// Overrides the price from the article registry.
	#[serde(rename = "UnitPrice", default, skip_serializing_if = "Option::is_none")]
	pub unit_price: Option<f64>,
	#[serde(rename = "DiscountPercentage", default)]
	pub discount_percentage: f64,
	#[serde(rename = "Quantity", default, skip_serializing_if = "Option::is_none")]
	pub quantity: Option<f64>,
	#[serde(rename = "WorkCostType", default)]
	pub work_cost_type: i64,
	#[serde(rename = "IsWorkCost", default)]
	pub is_work_cost: bool,
	#[serde(rename = "WorkHours", default, skip_serializing_if = "Option::is_none")]
	pub work_hours: Option<f64>,
	#[serde(rename = "MaterialCosts", default, skip_serializing_if = "Option::is_none")]
	pub material_costs: Option<f64>,
	#[serde(rename = "ReversedConstructionServicesVatFree", default)]
	pub reversed_construction_services_vat_free: bool,
	#[serde(
		rename = "CostCenterItemId1",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub cost_center_item_id1: Option<Uuid>,
	#[serde(
		rename = "CostCenterItemId2",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub cost_center_item_id2: Option<Uuid>,
	#[serde(
		rename = "CostCenterItemId3",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub cost_center_item_id3: Option<Uuid>,
	#[serde(
		rename = "UnitAbbreviation",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub unit_abbreviation: Option<String>,
	#[serde(rename = "VatRateId", default, skip_serializing_if = "Option::is_none")]
	pub vat_rate_id: Option<String>,
	#[serde(rename = "UnitName", default, skip_serializing_if = "Option::is_none")]
	pub unit_name: Option<String>,
	#[serde(rename = "ProjectId", default, skip_serializing_if = "Option::is_none")]
	pub project_id: Option<Uuid>,
}

static DRAFT_ROW_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("CustomerInvoiceDraftRow")
		.field(
			FieldDescriptor::integer("line_number", "LineNumber")
				.required()
				.range(0.0, 1000.0),
		)
		.field(FieldDescriptor::uuid("article_id", "ArticleId").nullable())
		.field(FieldDescriptor::string("article_number", "ArticleNumber").nullable())
		.field(
			FieldDescriptor::boolean("is_text_row", "IsTextRow")
				.required()
				.default_value(false),
		)
		.field(FieldDescriptor::string("text", "Text").required().max_length(2000))
		.field(FieldDescriptor::number("unit_price", "UnitPrice").nullable())
		.field(
			FieldDescriptor::number("discount_percentage", "DiscountPercentage")
				.default_value(0)
				.range(0.0, 1.0),
		)
		.field(FieldDescriptor::number("quantity", "Quantity").nullable())
		.field(FieldDescriptor::integer("work_cost_type", "WorkCostType").default_value(0))
		.field(FieldDescriptor::boolean("is_work_cost", "IsWorkCost").default_value(false))
		.field(FieldDescriptor::number("work_hours", "WorkHours").nullable())
		.field(FieldDescriptor::number("material_costs", "MaterialCosts").nullable())
		.field(
			FieldDescriptor::boolean(
				"reversed_construction_services_vat_free",
				"ReversedConstructionServicesVatFree",
			)
			.required()
			.default_value(false),
		)
		.field(FieldDescriptor::uuid("cost_center_item_id1", "CostCenterItemId1").nullable())
		.field(FieldDescriptor::uuid("cost_center_item_id2", "CostCenterItemId2").nullable())
		.field(FieldDescriptor::uuid("cost_center_item_id3", "CostCenterItemId3").nullable())
		.field(FieldDescriptor::string("unit_abbreviation", "UnitAbbreviation").nullable())
		.field(FieldDescriptor::string("vat_rate_id", "VatRateId").read_only())
		.field(FieldDescriptor::string("unit_name", "UnitName").nullable())
		.field(FieldDescriptor::uuid("project_id", "ProjectId").nullable())
		.build()
});

impl Model for CustomerInvoiceDraftRow {
	fn meta() -> &'static ModelMeta {
		&DRAFT_ROW_META
	}
}

impl CustomerInvoiceDraftRow {
	/// An article row; set `article_id` (or `article_number`) afterwards.
	pub fn new(line_number: i64, text: impl Into<String>) -> Self {
		Self {
			line_number,
			article_id: None,
			article_number: None,
			is_text_row: false,
			text: text.into(),
			unit_price: None,
			discount_percentage: 0.0,
			quantity: None,
			work_cost_type: 0,
			is_work_cost: false,
			work_hours: None,
			material_costs: None,
			reversed_construction_services_vat_free: false,
			cost_center_item_id1: None,
			cost_center_item_id2: None,
			cost_center_item_id3: None,
			unit_abbreviation: None,
			vat_rate_id: None,
			unit_name: None,
			project_id: None,
		}
	}

	/// A free-text row without an article reference.
	pub fn text_row(line_number: i64, text: impl Into<String>) -> Self {
		let mut row = Self::new(line_number, text);
		row.is_text_row = true;
		row
	}
}

/// A draft of a customer invoice.
///
/// Drafts hold everything an invoice will contain; converting a draft to
/// an actual invoice happens in eAccounting. Amount fields are computed
/// by the API and read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInvoiceDraft {
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	/// Reference into `/customers`.
	#[serde(rename = "CustomerId")]
	pub customer_id: Uuid,
	#[serde(rename = "CreatedUtc", default, skip_serializing_if = "Option::is_none")]
	pub created_utc: Option<NaiveDateTime>,
	#[serde(rename = "IsCreditInvoice", default)]
	pub is_credit_invoice: bool,
	/// 0 = normal, 1 = ROT, 2 = RUT.
	#[serde(rename = "RotReducedInvoicingType", default)]
	pub rot_reduced_invoicing_type: i64,
	#[serde(rename = "Rows", default)]
	pub rows: Vec<CustomerInvoiceDraftRow>,
	#[serde(rename = "YourReference", default, skip_serializing_if = "Option::is_none")]
	pub your_reference: Option<String>,
	#[serde(rename = "OurReference", default, skip_serializing_if = "Option::is_none")]
	pub our_reference: Option<String>,
	#[serde(
		rename = "InvoiceCustomerName",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub invoice_customer_name: Option<String>,
	#[serde(rename = "InvoiceAddress1", default, skip_serializing_if = "Option::is_none")]
	pub invoice_address1: Option<String>,
	#[serde(rename = "InvoiceAddress2", default, skip_serializing_if = "Option::is_none")]
	pub invoice_address2: Option<String>,
	#[serde(rename = "InvoicePostalCode")]
	pub invoice_postal_code: String,
	#[serde(rename = "InvoiceCity")]
	pub invoice_city: String,
	#[serde(rename = "InvoiceCountryCode", default = "default_country_code")]
	pub invoice_country_code: String,
	#[serde(
		rename = "InvoiceCurrencyCode",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub invoice_currency_code: Option<String>,
	#[serde(rename = "EuThirdParty", default)]
	pub eu_third_party: bool,
	#[serde(rename = "CustomerIsPrivatePerson", default)]
	pub customer_is_private_person: bool,
	#[serde(
		rename = "SalesDocumentAttachments",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub sales_document_attachments: Option<Vec<Uuid>>,
	#[serde(rename = "InvoiceDate", default, skip_serializing_if = "Option::is_none")]
	pub invoice_date: Option<NaiveDateTime>,
	#[serde(rename = "DeliveryDate", default, skip_serializing_if = "Option::is_none")]
	pub delivery_date: Option<NaiveDateTime>,
	#[serde(rename = "TotalAmount", default, skip_serializing_if = "Option::is_none")]
	pub total_amount: Option<f64>,
	#[serde(rename = "TotalVatAmount", default, skip_serializing_if = "Option::is_none")]
	pub total_vat_amount: Option<f64>,
	#[serde(rename = "TotalRoundings", default, skip_serializing_if = "Option::is_none")]
	pub total_roundings: Option<f64>,
	#[serde(rename = "CustomerNumber", default, skip_serializing_if = "Option::is_none")]
	pub customer_number: Option<String>,
	/// Whether row unit prices include VAT; decided by the company
	/// settings at creation.
	#[serde(rename = "IncludesVat", default, skip_serializing_if = "Option::is_none")]
	pub includes_vat: Option<bool>,
}

fn default_country_code() -> String {
	"SE".to_string()
}

static DRAFT_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("CustomerInvoiceDraft")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(FieldDescriptor::uuid("customer_id", "CustomerId").required())
		.field(FieldDescriptor::datetime("created_utc", "CreatedUtc").read_only())
		.field(
			FieldDescriptor::boolean("is_credit_invoice", "IsCreditInvoice")
				.default_value(false),
		)
		.field(
			FieldDescriptor::integer("rot_reduced_invoicing_type", "RotReducedInvoicingType")
				.required()
				.default_value(0)
				.one_of(&[0, 1, 2]),
		)
		.field(FieldDescriptor::list("rows", "Rows"))
		.field(
			FieldDescriptor::string("your_reference", "YourReference")
				.nullable()
				.max_length(100),
		)
		.field(
			FieldDescriptor::string("our_reference", "OurReference")
				.nullable()
				.max_length(100),
		)
		.field(
			FieldDescriptor::string("invoice_customer_name", "InvoiceCustomerName")
				.read_only()
				.max_length(50),
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
			FieldDescriptor::string("invoice_postal_code", "InvoicePostalCode")
				.required()
				.max_length(10),
		)
		.field(
			FieldDescriptor::string("invoice_city", "InvoiceCity")
				.required()
				.max_length(50),
		)
		.field(
			FieldDescriptor::string("invoice_country_code", "InvoiceCountryCode")
				.required()
				.default_value("SE")
				.max_length(2),
		)
		.field(
			FieldDescriptor::string("invoice_currency_code", "InvoiceCurrencyCode").read_only(),
		)
		.field(
			FieldDescriptor::boolean("eu_third_party", "EuThirdParty")
				.required()
				.default_value(false),
		)
		.field(
			FieldDescriptor::boolean("customer_is_private_person", "CustomerIsPrivatePerson")
				.required()
				.default_value(false),
		)
		.field(
			FieldDescriptor::list("sales_document_attachments", "SalesDocumentAttachments")
				.read_only(),
		)
		.field(FieldDescriptor::datetime("invoice_date", "InvoiceDate").nullable())
		.field(FieldDescriptor::datetime("delivery_date", "DeliveryDate").nullable())
		.field(FieldDescriptor::number("total_amount", "TotalAmount").read_only())
		.field(FieldDescriptor::number("total_vat_amount", "TotalVatAmount").read_only())
		.field(FieldDescriptor::number("total_roundings", "TotalRoundings").read_only())
		.field(
			FieldDescriptor::string("customer_number", "CustomerNumber")
				.read_only()
				.max_length(16),
		)
		.field(FieldDescriptor::boolean("includes_vat", "IncludesVat").read_only())
		.endpoint(
			"/customerinvoicedrafts",
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

impl Model for CustomerInvoiceDraft {
	fn meta() -> &'static ModelMeta {
		&DRAFT_META
	}
}

impl ApiModel for CustomerInvoiceDraft {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

impl CustomerInvoiceDraft {
	pub fn builder() -> CustomerInvoiceDraftBuilder {
		CustomerInvoiceDraftBuilder::default()
	}
}

/// Builds a [`CustomerInvoiceDraft`] with the required fields checked.
#[derive(Debug, Default)]
pub struct CustomerInvoiceDraftBuilder {
	customer_id: Option<Uuid>,
	invoice_postal_code: Option<String>,
	invoice_city: Option<String>,
	invoice_country_code: Option<String>,
	customer_is_private_person: bool,
	eu_third_party: bool,
	your_reference: Option<String>,
	our_reference: Option<String>,
	invoice_date: Option<NaiveDateTime>,
	delivery_date: Option<NaiveDateTime>,
	rows: Vec<CustomerInvoiceDraftRow>,
}

impl CustomerInvoiceDraftBuilder {
	pub fn customer_id(mut self, value: Uuid) -> Self {
		self.customer_id = Some(value);
		self
	}

	pub fn invoice_postal_code(mut self, value: impl Into<String>) -> Self {
		self.invoice_postal_code = Some(value.into());
		self
	}

	pub fn invoice_city(mut self, value: impl Into<String>) -> Self {
		self.invoice_city = Some(value.into());
		self
	}

	pub fn invoice_country_code(mut self, value: impl Into<String>) -> Self {
		self.invoice_country_code = Some(value.into());
		self
	}

	pub fn customer_is_private_person(mut self, value: bool) -> Self {
		self.customer_is_private_person = value;
		self
	}

	pub fn eu_third_party(mut self, value: bool) -> Self {
		self.eu_third_party = value;
		self
	}

	pub fn your_reference(mut self, value: impl Into<String>) -> Self {
		self.your_reference = Some(value.into());
		self
	}

	pub fn our_reference(mut self, value: impl Into<String>) -> Self {
		self.our_reference = Some(value.into());
		self
	}

	pub fn invoice_date(mut self, value: NaiveDateTime) -> Self {
		self.invoice_date = Some(value);
		self
	}

	pub fn delivery_date(mut self, value: NaiveDateTime) -> Self {
		self.delivery_date = Some(value);
		self
	}

	pub fn row(mut self, row: CustomerInvoiceDraftRow) -> Self {
		self.rows.push(row);
		self
	}

	pub fn build(self) -> Result<CustomerInvoiceDraft> {
		let missing = |field: &str| {
			Error::Client(ClientError::MissingField {
				model: CustomerInvoiceDraft::meta().name,
				field: field.to_string(),
			})
		};

		Ok(CustomerInvoiceDraft {
			id: None,
			customer_id: self.customer_id.ok_or_else(|| missing("customer_id"))?,
			created_utc: None,
			is_credit_invoice: false,
			rot_reduced_invoicing_type: 0,
			rows: self.rows,
			your_reference: self.your_reference,
			our_reference: self.our_reference,
			invoice_customer_name: None,
			invoice_address1: None,
			invoice_address2: None,
			invoice_postal_code: self
				.invoice_postal_code
				.ok_or_else(|| missing("invoice_postal_code"))?,
			invoice_city: self.invoice_city.ok_or_else(|| missing("invoice_city"))?,
			invoice_country_code: self.invoice_country_code.unwrap_or_else(default_country_code),
			invoice_currency_code: None,
			eu_third_party: self.eu_third_party,
			customer_is_private_person: self.customer_is_private_person,
			sales_document_attachments: None,
			invoice_date: self.invoice_date,
			delivery_date: self.delivery_date,
			total_amount: None,
			total_vat_amount: None,
			total_roundings: None,
			customer_number: None,
			includes_vat: None,
		})
	}
}
