//! Error types for the eAccounting client core.
//!
//! Three kinds of failure are kept apart so callers can tell a local
//! programming error from a remote rejection: [`ClientError`] is raised
//! before any I/O, [`Error::Api`] carries a non-success response from the
//! remote side, and [`Error::Decode`] marks a response body that did not
//! match the declared schema.

use thiserror::Error;

use crate::meta::Operation;
use crate::query::Operator;

/// Local, pre-network misuse of the client.
///
/// None of these variants are ever produced after a request has been
/// issued; they all abort the operation before the transport is touched.
#[derive(Debug, Error)]
pub enum ClientError {
	/// The operation is not in the endpoint contract's allowed set.
	#[error("`{operation}` is not allowed on {model}")]
	MethodNotAllowed {
		model: &'static str,
		operation: Operation,
	},

	/// A predicate or ordering referenced a field the model does not declare.
	#[error("{model} has no field `{field}`")]
	UnknownField { model: &'static str, field: String },

	/// An operator was given a field or value it cannot work with.
	#[error("`{op}` cannot be applied to `{field}`: {reason}")]
	InvalidOperand {
		field: String,
		op: Operator,
		reason: String,
	},

	/// A required, non-nullable field is missing a value.
	#[error("{model}.{field} is required and may not be empty")]
	MissingField { model: &'static str, field: String },

	/// A field value violates its declared constraints.
	#[error("{model}.{field}: {reason}")]
	Validation {
		model: &'static str,
		field: String,
		reason: String,
	},

	/// The model declares no endpoint and cannot be used with a manager.
	#[error("{model} does not declare an endpoint")]
	NoEndpoint { model: &'static str },

	/// No transport has been registered for the process.
	#[error("no transport has been initialized; call init_transport first")]
	NotInitialized,

	/// Client or transport configuration is unusable.
	#[error("invalid configuration: {0}")]
	Configuration(String),

	/// A model declaration is internally inconsistent.
	#[error("invalid declaration of {model}: {reason}")]
	InvalidDeclaration {
		model: &'static str,
		reason: String,
	},
}

/// Any failure surfaced by the client.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Client(#[from] ClientError),

	/// The remote side answered with a non-success status. The raw body
	/// is carried along unchanged.
	#[error("API request failed with status {status}")]
	Api { status: u16, body: serde_json::Value },

	/// The request never produced a response (connection, TLS, timeout).
	#[error("transport error: {0}")]
	Transport(String),

	/// A response body did not match the expected schema shape.
	#[error("failed to decode response: {0}")]
	Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
