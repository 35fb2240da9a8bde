//! Core machinery of the eAccounting client.
//!
//! This crate holds everything that is not resource data or HTTP
//! plumbing:
//!
//! - [`FieldDescriptor`] / [`ModelMeta`]: the declarative schema layer.
//!   Each resource declares its fields and endpoint once; the built
//!   metadata encodes and decodes wire bodies, honoring field directions
//!   (read-only fields never leave the client, write-only fields never
//!   enter it).
//! - [`Manager`]: the per-resource gateway. Enforces the
//!   allowed-operation whitelist before any I/O and performs
//!   get/create/update/delete.
//! - [`Query`] / [`QueryCompiler`]: the backend-agnostic predicate
//!   accumulator and the pluggable translation to `$filter`/`$orderby`
//!   query options ([`ODataCompiler`] for eAccounting).
//! - [`QuerySet`]: the lazy, paginated, cache-once cursor.
//! - [`Transport`]: the HTTP boundary, implemented out of crate.
//!
//! The error taxonomy separates local misuse ([`ClientError`], raised
//! before any request) from remote rejections ([`Error::Api`]) and
//! malformed responses ([`Error::Decode`]).

mod compiler;
mod error;
mod fields;
mod manager;
mod meta;
mod model;
mod query;
mod queryset;
mod transport;

pub use compiler::{ODataCompiler, QueryCompiler};
pub use error::{ClientError, Error, Result};
pub use fields::{Constraints, FieldDescriptor, FieldDirection, FieldKind};
pub use manager::Manager;
pub use meta::{EndpointContract, EnvelopeSpec, MetaBuilder, ModelMeta, Operation, PageMeta};
pub use model::{ApiModel, Model};
pub use query::{FilterValue, Operator, Predicate, Query};
pub use queryset::{DEFAULT_PAGE_SIZE, QuerySet};
pub use transport::{ApiResponse, Transport, global_transport, init_transport};
