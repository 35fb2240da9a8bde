//! Checks that the resource declarations match the wire format and that
//! builders enforce required fields before anything touches a manager.

use serde_json::json;
use uuid::Uuid;
use visma_core::{ClientError, Error, FieldDirection, Model, Operation};
use visma_models::{
	CompanySettings, Customer, CustomerInvoiceDraft, CustomerInvoiceDraftRow, FiscalYear,
	RelatedAccounts, TermsOfPayment, VatCode,
};

#[test]
fn test_customer_declares_full_crud() {
	let contract = Customer::meta().contract().unwrap();
	assert_eq!(contract.path, "/customers");
	for operation in [
		Operation::List,
		Operation::Get,
		Operation::Create,
		Operation::Update,
		Operation::Delete,
	] {
		assert!(contract.allows(operation));
	}
	assert!(contract.envelope.is_some());
}

#[test]
fn test_terms_of_payment_is_read_only_in_the_api() {
	let contract = TermsOfPayment::meta().contract().unwrap();
	assert!(contract.allows(Operation::List));
	assert!(contract.allows(Operation::Get));
	assert!(!contract.allows(Operation::Create));
	assert!(!contract.allows(Operation::Update));
	assert!(!contract.allows(Operation::Delete));
}

#[test]
fn test_company_settings_has_no_envelope() {
	let contract = CompanySettings::meta().contract().unwrap();
	assert!(contract.envelope.is_none());
	assert!(contract.allows(Operation::Update));
	assert!(!contract.allows(Operation::Get));
}

#[test]
fn test_value_objects_have_no_endpoint() {
	assert!(RelatedAccounts::meta().endpoint.is_none());
	assert!(CustomerInvoiceDraftRow::meta().endpoint.is_none());
}

#[test]
fn test_customer_builder_rejects_missing_required_fields() {
	// terms_of_payment_id is never set.
	let result = Customer::builder()
		.name("Ann Andersson")
		.invoice_city("Helsingborg")
		.invoice_postal_code("252 25")
		.build();

	match result {
		Err(Error::Client(ClientError::MissingField { model, field })) => {
			assert_eq!(model, "Customer");
			assert_eq!(field, "terms_of_payment_id");
		}
		other => panic!("expected a missing-field error, got {other:?}"),
	}
}

#[test]
fn test_customer_builder_applies_declared_defaults() {
	let customer = Customer::builder()
		.name("Ann Andersson")
		.invoice_city("Helsingborg")
		.invoice_postal_code("252 25")
		.terms_of_payment_id(Uuid::new_v4())
		.build()
		.unwrap();

	assert!(customer.id.is_none());
	assert!(customer.is_active);
	assert!(!customer.is_private_person);
	assert_eq!(customer.discount_percentage, 0.0);
}

#[test]
fn test_customer_encode_omits_read_only_fields() {
	let mut customer = Customer::builder()
		.name("Ann Andersson")
		.invoice_city("Helsingborg")
		.invoice_postal_code("252 25")
		.terms_of_payment_id(Uuid::new_v4())
		.build()
		.unwrap();
	customer.id = Some(Uuid::new_v4());
	customer.terms_of_payment = Some(TermsOfPayment {
		id: Some(Uuid::new_v4()),
		name: Some("30 dagar".to_string()),
		name_english: None,
		number_of_days: Some(30),
		terms_of_payment_type_id: None,
		terms_of_payment_type_text: None,
		available_for_sales: None,
		available_for_purchase: None,
	});

	let body = Customer::meta().encode(&customer).unwrap();
	assert!(body.get("Id").is_none());
	assert!(body.get("TermsOfPayment").is_none());
	assert!(body.get("PayToAccountId").is_none());
	assert_eq!(body.get("Name"), Some(&json!("Ann Andersson")));
	assert_eq!(body.get("IsActive"), Some(&json!(true)));
}

#[test]
fn test_customer_decodes_a_wire_object_with_nested_terms() {
	let id = Uuid::new_v4();
	let terms_id = Uuid::new_v4();
	let body = json!({
		"Id": id,
		"Name": "Ann Andersson",
		"InvoiceCity": "Helsingborg",
		"InvoicePostalCode": "252 25",
		"TermsOfPaymentId": terms_id,
		"TermsOfPayment": {
			"Id": terms_id,
			"Name": "30 dagar",
			"NumberOfDays": 30,
		},
		"IsPrivatePerson": false,
		"IsActive": true,
		"ChangedUtc": "2018-05-07T09:20:41",
	});

	let customer: Customer = Customer::meta().decode(body).unwrap();
	assert_eq!(customer.id, Some(id));
	assert_eq!(customer.name, "Ann Andersson");
	let terms = customer.terms_of_payment.unwrap();
	assert_eq!(terms.number_of_days, Some(30));
	assert!(customer.changed_utc.is_some());
}

#[test]
fn test_draft_builder_defaults_the_country_code() {
	let draft = CustomerInvoiceDraft::builder()
		.customer_id(Uuid::new_v4())
		.invoice_city("Helsingborg")
		.invoice_postal_code("252 25")
		.row(CustomerInvoiceDraftRow::new(1, "Greenhouse tomatoes"))
		.row(CustomerInvoiceDraftRow::text_row(2, "Delivered in crates"))
		.build()
		.unwrap();

	assert_eq!(draft.invoice_country_code, "SE");
	assert_eq!(draft.rows.len(), 2);
	assert!(draft.rows[1].is_text_row);
}

#[test]
fn test_draft_encode_validates_the_rot_type_enumeration() {
	let mut draft = CustomerInvoiceDraft::builder()
		.customer_id(Uuid::new_v4())
		.invoice_city("Helsingborg")
		.invoice_postal_code("252 25")
		.build()
		.unwrap();
	draft.rot_reduced_invoicing_type = 7;

	let result = CustomerInvoiceDraft::meta().encode(&draft);
	assert!(matches!(
		result,
		Err(Error::Client(ClientError::Validation { .. }))
	));
}

#[test]
fn test_fiscal_year_round_trip() {
	let body = json!({
		"Id": Uuid::new_v4(),
		"StartDate": "2018-01-01",
		"EndDate": "2018-12-31",
		"IsLockedForAccounting": false,
		"BookkeepingMethod": 0,
	});

	let year: FiscalYear = FiscalYear::meta().decode(body).unwrap();
	assert_eq!(year.start_date.to_string(), "2018-01-01");

	// Server-maintained fields stay behind when the year is sent back.
	let encoded = FiscalYear::meta().encode(&year).unwrap();
	assert!(encoded.get("Id").is_none());
	assert!(encoded.get("IsLockedForAccounting").is_none());
	assert!(encoded.get("BookkeepingMethod").is_none());
	assert_eq!(encoded.get("StartDate"), Some(&json!("2018-01-01")));
}

#[test]
fn test_vat_code_decodes_nested_related_accounts() {
	let body = json!({
		"Id": Uuid::new_v4(),
		"Code": "21",
		"Description": "Utgående moms 25%",
		"VatRate": 25.0,
		"RelatedAccounts": { "AccountNumber1": 2611, "AccountNumber2": 2621 },
	});

	let code: VatCode = VatCode::meta().decode(body).unwrap();
	let accounts = code.related_accounts.unwrap();
	assert_eq!(accounts.account_number1, Some(2611));
	assert_eq!(accounts.account_number3, None);
}

#[test]
fn test_read_only_directions_are_declared() {
	let meta = Customer::meta();
	for name in ["id", "pay_to_account_id", "changed_utc", "last_invoice_date"] {
		let field = meta.field(name).unwrap();
		assert_eq!(field.direction, FieldDirection::ReadOnly, "{name}");
	}
	assert!(meta.field("name").unwrap().required);
	assert_eq!(meta.field("name").unwrap().constraints.max_length, Some(50));
}
