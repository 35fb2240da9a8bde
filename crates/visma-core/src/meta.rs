//! Model metadata and schema synthesis.
//!
//! A [`ModelMeta`] is built exactly once per declared resource, through
//! [`ModelMeta::builder`]. The builder collects the field descriptors and
//! the endpoint declaration, validates the whole thing, and the result
//! acts as the serialization schema: [`ModelMeta::encode`] produces the
//! wire body for create/update calls (dropping read-only fields and
//! checking required values and constraints), [`ModelMeta::decode`]
//! materializes an instance from a response body (dropping write-only
//! fields first).
//!
//! An invalid declaration fails when the metadata is built, not on first
//! use of the resource.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{ClientError, Error, Result};
use crate::fields::{FieldDescriptor, FieldDirection};

/// One remote operation a resource endpoint may allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	List,
	Get,
	Create,
	Update,
	Delete,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Operation::List => "list",
			Operation::Get => "get",
			Operation::Create => "create",
			Operation::Update => "update",
			Operation::Delete => "delete",
		};
		f.write_str(name)
	}
}

/// Where a paginated list response keeps its payload.
#[derive(Debug, Clone)]
pub struct EnvelopeSpec {
	/// Key of the array holding the page's items.
	pub data_key: &'static str,
	/// Key of the pagination metadata object.
	pub meta_key: &'static str,
}

impl Default for EnvelopeSpec {
	fn default() -> Self {
		Self {
			data_key: "Data",
			meta_key: "Meta",
		}
	}
}

impl EnvelopeSpec {
	/// Splits a list response into its items and page metadata.
	pub fn unwrap_page(&self, body: Value) -> Result<(Vec<Value>, PageMeta)> {
		let mut envelope = match body {
			Value::Object(map) => map,
			other => {
				return Err(Error::Decode(format!(
					"expected a pagination envelope, got {other}"
				)));
			}
		};
		let items = match envelope.remove(self.data_key) {
			Some(Value::Array(items)) => items,
			Some(other) => {
				return Err(Error::Decode(format!(
					"envelope key `{}` is not an array: {other}",
					self.data_key
				)));
			}
			None => {
				return Err(Error::Decode(format!(
					"envelope is missing the `{}` key",
					self.data_key
				)));
			}
		};
		let meta = envelope.remove(self.meta_key).ok_or_else(|| {
			Error::Decode(format!("envelope is missing the `{}` key", self.meta_key))
		})?;
		let meta: PageMeta =
			serde_json::from_value(meta).map_err(|e| Error::Decode(e.to_string()))?;
		Ok((items, meta))
	}
}

/// Pagination metadata as returned on every paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
	#[serde(rename = "CurrentPage")]
	pub current_page: u32,
	#[serde(rename = "PageSize")]
	pub page_size: u32,
	#[serde(rename = "TotalNumberOfPages")]
	pub total_number_of_pages: u32,
	#[serde(rename = "TotalNumberOfResults")]
	pub total_number_of_results: u32,
	#[serde(rename = "ServerTimeUtc", default, skip_serializing_if = "Option::is_none")]
	pub server_time_utc: Option<NaiveDateTime>,
}

/// The remote contract of one resource: path, allowed operations and the
/// pagination envelope, if the list endpoint uses one.
#[derive(Debug, Clone)]
pub struct EndpointContract {
	pub path: &'static str,
	pub allowed: Vec<Operation>,
	pub envelope: Option<EnvelopeSpec>,
}

impl EndpointContract {
	pub fn allows(&self, operation: Operation) -> bool {
		self.allowed.contains(&operation)
	}
}

/// The synthesized schema and endpoint contract of one resource type.
#[derive(Debug, Clone)]
pub struct ModelMeta {
	pub name: &'static str,
	fields: Vec<FieldDescriptor>,
	pub endpoint: Option<EndpointContract>,
}

impl ModelMeta {
	pub fn builder(name: &'static str) -> MetaBuilder {
		MetaBuilder {
			name,
			fields: Vec::new(),
			path: None,
			allowed: Vec::new(),
			envelope: None,
		}
	}

	/// All declared fields, in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Looks a field up by its Rust-side name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// The endpoint contract, or [`ClientError::NoEndpoint`] for pure
	/// value objects.
	pub fn contract(&self) -> Result<&EndpointContract> {
		self.endpoint
			.as_ref()
			.ok_or_else(|| ClientError::NoEndpoint { model: self.name }.into())
	}

	/// Encodes an instance into the wire body of a create/update call.
	///
	/// Read-only fields are stripped, required values and declared
	/// constraints are checked; any violation aborts before the body is
	/// handed to the transport.
	pub fn encode<M: Serialize>(&self, instance: &M) -> Result<Value> {
		let mut body =
			serde_json::to_value(instance).map_err(|e| Error::Decode(e.to_string()))?;
		let map = body.as_object_mut().ok_or_else(|| {
			Error::Decode(format!("{} did not serialize to an object", self.name))
		})?;

		for field in &self.fields {
			if field.direction == FieldDirection::ReadOnly {
				map.remove(field.wire_key);
			}
		}

		for field in &self.fields {
			if field.direction == FieldDirection::ReadOnly {
				continue;
			}
			match map.get(field.wire_key) {
				Some(value) => field.check(self.name, value)?,
				None if field.required && !field.nullable => {
					return Err(ClientError::MissingField {
						model: self.name,
						field: field.name.to_string(),
					}
					.into());
				}
				None => {}
			}
		}

		Ok(body)
	}

	/// Decodes a wire object into an instance.
	///
	/// Write-only fields never reach the decoded value; a body that does
	/// not match the declared shape surfaces as [`Error::Decode`].
	pub fn decode<M: DeserializeOwned>(&self, mut body: Value) -> Result<M> {
		if let Some(map) = body.as_object_mut() {
			for field in &self.fields {
				if field.direction == FieldDirection::WriteOnly {
					map.remove(field.wire_key);
				}
			}
		}
		serde_json::from_value(body)
			.map_err(|e| Error::Decode(format!("{}: {e}", self.name)))
	}
}

/// Collects a resource declaration and validates it as a whole.
pub struct MetaBuilder {
	name: &'static str,
	fields: Vec<FieldDescriptor>,
	path: Option<&'static str>,
	allowed: Vec<Operation>,
	envelope: Option<EnvelopeSpec>,
}

impl MetaBuilder {
	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	pub fn endpoint(mut self, path: &'static str, allowed: &[Operation]) -> Self {
		self.path = Some(path);
		self.allowed = allowed.to_vec();
		self
	}

	/// Declares the standard `Data`/`Meta` pagination envelope for the
	/// list endpoint.
	pub fn paginated(mut self) -> Self {
		self.envelope = Some(EnvelopeSpec::default());
		self
	}

	pub fn envelope(mut self, data_key: &'static str, meta_key: &'static str) -> Self {
		self.envelope = Some(EnvelopeSpec { data_key, meta_key });
		self
	}

	/// Validates and builds the metadata.
	pub fn try_build(self) -> std::result::Result<ModelMeta, ClientError> {
		let invalid = |reason: String| ClientError::InvalidDeclaration {
			model: self.name,
			reason,
		};

		if self.fields.is_empty() {
			return Err(invalid("a model must declare at least one field".into()));
		}
		for (index, field) in self.fields.iter().enumerate() {
			let rest = &self.fields[index + 1..];
			if rest.iter().any(|other| other.name == field.name) {
				return Err(invalid(format!("duplicate field `{}`", field.name)));
			}
			if rest.iter().any(|other| other.wire_key == field.wire_key) {
				return Err(invalid(format!("duplicate wire key `{}`", field.wire_key)));
			}
		}

		let endpoint = match (self.path, self.allowed.is_empty()) {
			(None, true) => {
				if self.envelope.is_some() {
					return Err(invalid(
						"a pagination envelope requires an endpoint".into(),
					));
				}
				None
			}
			(None, false) => {
				return Err(invalid(
					"operations are allowed but no endpoint path is declared".into(),
				));
			}
			(Some(_), true) => {
				return Err(invalid(
					"an endpoint path is declared but no operations are allowed".into(),
				));
			}
			(Some(path), false) => {
				if !path.starts_with('/') || path.len() < 2 {
					return Err(invalid(format!("malformed endpoint path `{path}`")));
				}
				if self.envelope.is_some() && !self.allowed.contains(&Operation::List) {
					return Err(invalid(
						"a pagination envelope requires the list operation".into(),
					));
				}
				Some(EndpointContract {
					path,
					allowed: self.allowed,
					envelope: self.envelope,
				})
			}
		};

		Ok(ModelMeta {
			name: self.name,
			fields: self.fields,
			endpoint,
		})
	}

	/// Builds the metadata.
	///
	/// # Panics
	///
	/// Panics if the declaration is invalid. Declarations are static; a
	/// broken one is a programming error that should surface the moment
	/// the resource type is first touched, not when a request is made.
	pub fn build(self) -> ModelMeta {
		let name = self.name;
		match self.try_build() {
			Ok(meta) => meta,
			Err(e) => panic!("invalid declaration of {name}: {e}"),
		}
	}
}
