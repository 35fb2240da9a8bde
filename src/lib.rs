//! # Visma
//!
//! A typed client library for the Visma eAccounting v2 API, modelled on
//! Django's ORM. Resources are declared once with their field descriptors
//! and endpoint contract; after that, calling code reads and writes them
//! through a per-resource [`Manager`] and a lazy, paginated
//! [`QuerySet`]:
//!
//! ```rust,ignore
//! use visma::prelude::*;
//!
//! visma::init().await?;
//!
//! let active = Customer::objects()
//!     .filter("is_active", true)?
//!     .exclude_op("name", Operator::Exact, "Internal")?
//!     .order_by("name")?;
//!
//! for customer in active.results().await? {
//!     println!("{:?}", customer.name);
//! }
//!
//! let mut customer = Customer::builder()
//!     .name("Ann Andersson")
//!     .invoice_city("Helsingborg")
//!     .invoice_postal_code("252 25")
//!     .terms_of_payment_id(terms.id.unwrap())
//!     .build()?;
//! customer.save().await?; // picks up the server-assigned id
//! ```
//!
//! Nothing touches the network until a `QuerySet` is materialized; the
//! result is cached on the set once fetched. Filtering, exclusion and
//! ordering compile to the API's `$filter`/`$orderby` parameters, and
//! list endpoints are drained page by page through the `Data`/`Meta`
//! pagination envelope.
//!
//! The crate is a thin facade over three member crates:
//!
//! - [`visma_core`]: managers, queries, the OData compiler, schema
//!   encode/decode and the error taxonomy.
//! - [`visma_models`]: the declared eAccounting resources.
//! - [`visma_client`]: the reqwest/OAuth2 transport (feature
//!   `client`, enabled by default).

pub use visma_core as core;
pub use visma_models as models;

#[cfg(feature = "client")]
pub use visma_client as client;

pub use visma_core::{ClientError, Error, Result};

#[cfg(feature = "client")]
use std::sync::Arc;

/// Connects the default transport from environment configuration and
/// registers it for all managers.
///
/// Reads `VISMA_CLIENT_ID`, `VISMA_CLIENT_SECRET`,
/// `VISMA_CREDENTIALS_PATH` and `VISMA_SANDBOX`, loads the persisted
/// token set and installs a [`visma_client::VismaClient`] as the
/// process-wide transport. Call once at startup.
#[cfg(feature = "client")]
pub async fn init() -> Result<()> {
	let config = visma_client::ClientConfig::from_env()?;
	let transport = visma_client::VismaClient::connect(config).await?;
	visma_core::init_transport(Arc::new(transport))
}

/// The items needed at a typical call site.
pub mod prelude {
	pub use visma_core::{
		ApiModel, ClientError, Error, Manager, Model, Operation, Operator, QuerySet, Result,
	};
	pub use visma_models::*;
}
