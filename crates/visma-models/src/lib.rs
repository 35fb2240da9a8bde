//! The declared eAccounting resources.
//!
//! Each resource is a plain serde struct plus a metadata declaration
//! built once through [`visma_core::ModelMeta::builder`]: the field
//! descriptors (wire key, kind, direction, constraints), the endpoint
//! path, the allowed operations and the pagination envelope. The
//! declarations here mirror the eAccounting v2 API documentation.
//!
//! Resources with an endpoint implement [`visma_core::ApiModel`] and are
//! used through `Resource::objects()`; value objects that only travel
//! nested inside another resource (invoice rows, related accounts)
//! implement [`visma_core::Model`] alone.

mod accounting;
mod customers;
mod invoices;

pub use accounting::{CompanySettings, FiscalYear, RelatedAccounts, VatCode};
pub use customers::{Customer, CustomerBuilder, TermsOfPayment};
pub use invoices::{
	CustomerInvoiceDraft, CustomerInvoiceDraftBuilder, CustomerInvoiceDraftRow,
};
