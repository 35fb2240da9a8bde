//! Field descriptors.
//!
//! Every attribute of a declared resource is described by one
//! [`FieldDescriptor`]: its wire key, value kind, direction and
//! constraints. Descriptors are built once, at declaration time, and
//! consumed by the schema (encode/decode), the query layer (predicate
//! validation) and the compiler (literal rendering).

use serde_json::Value;

use crate::error::ClientError;

/// The wire-level kind of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Str,
	Integer,
	Number,
	Boolean,
	DateTime,
	Date,
	/// A GUID assigned by eAccounting. Rendered bare in filter
	/// expressions, unlike strings.
	Uuid,
	/// A nested resource object.
	Nested,
	/// A list of values or nested objects.
	List,
}

impl FieldKind {
	/// Whether a filter predicate may reference a field of this kind.
	pub fn is_filterable(self) -> bool {
		!matches!(self, FieldKind::Nested | FieldKind::List)
	}
}

/// Which way a field travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldDirection {
	#[default]
	ReadWrite,
	/// Returned by the API but never sent (server-computed fields).
	ReadOnly,
	/// Sent to the API but never exposed from a response.
	WriteOnly,
}

/// Declared value constraints, checked before a body leaves the client.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub one_of: Option<&'static [i64]>,
}

/// Metadata for one field of a declared resource.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// The Rust-side field name, used in filter and ordering calls.
	pub name: &'static str,
	/// The PascalCase key the API uses for this field.
	pub wire_key: &'static str,
	pub kind: FieldKind,
	pub required: bool,
	pub nullable: bool,
	pub default: Option<Value>,
	pub direction: FieldDirection,
	pub constraints: Constraints,
}

impl FieldDescriptor {
	fn new(name: &'static str, wire_key: &'static str, kind: FieldKind) -> Self {
		Self {
			name,
			wire_key,
			kind,
			required: false,
			nullable: false,
			default: None,
			direction: FieldDirection::default(),
			constraints: Constraints::default(),
		}
	}

	pub fn string(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Str)
	}

	pub fn integer(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Integer)
	}

	pub fn number(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Number)
	}

	pub fn boolean(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Boolean)
	}

	pub fn datetime(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::DateTime)
	}

	pub fn date(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Date)
	}

	pub fn uuid(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Uuid)
	}

	pub fn nested(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::Nested)
	}

	pub fn list(name: &'static str, wire_key: &'static str) -> Self {
		Self::new(name, wire_key, FieldKind::List)
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	pub fn read_only(mut self) -> Self {
		self.direction = FieldDirection::ReadOnly;
		self
	}

	pub fn write_only(mut self) -> Self {
		self.direction = FieldDirection::WriteOnly;
		self
	}

	pub fn default_value(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn max_length(mut self, max: usize) -> Self {
		self.constraints.max_length = Some(max);
		self
	}

	pub fn length(mut self, min: usize, max: usize) -> Self {
		self.constraints.min_length = Some(min);
		self.constraints.max_length = Some(max);
		self
	}

	pub fn range(mut self, min: f64, max: f64) -> Self {
		self.constraints.min = Some(min);
		self.constraints.max = Some(max);
		self
	}

	pub fn one_of(mut self, choices: &'static [i64]) -> Self {
		self.constraints.one_of = Some(choices);
		self
	}

	/// Checks an encoded value against the declared constraints.
	pub fn check(&self, model: &'static str, value: &Value) -> Result<(), ClientError> {
		let violation = |reason: String| ClientError::Validation {
			model,
			field: self.name.to_string(),
			reason,
		};

		if value.is_null() {
			if self.nullable {
				return Ok(());
			}
			return Err(ClientError::MissingField {
				model,
				field: self.name.to_string(),
			});
		}

		if let Some(text) = value.as_str() {
			let len = text.chars().count();
			if let Some(max) = self.constraints.max_length {
				if len > max {
					return Err(violation(format!("exceeds maximum length {max}")));
				}
			}
			if let Some(min) = self.constraints.min_length {
				if len < min {
					return Err(violation(format!("shorter than minimum length {min}")));
				}
			}
		}

		if let Some(n) = value.as_f64() {
			if let Some(max) = self.constraints.max {
				if n > max {
					return Err(violation(format!("greater than maximum {max}")));
				}
			}
			if let Some(min) = self.constraints.min {
				if n < min {
					return Err(violation(format!("less than minimum {min}")));
				}
			}
			if let Some(choices) = self.constraints.one_of {
				match value.as_i64() {
					Some(i) if choices.contains(&i) => {}
					_ => return Err(violation(format!("must be one of {choices:?}"))),
				}
			}
		}

		Ok(())
	}
}
