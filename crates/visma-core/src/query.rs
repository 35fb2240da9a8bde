//! The lazy query model: operators, filter values and the predicate
//! accumulator.
//!
//! A [`Query`] never performs I/O and never renders wire syntax; it only
//! records intent. An exclusion stores the *same* operator the caller
//! named; the semantic inversion is the compiler's job, so a query stays
//! backend-agnostic.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::error::ClientError;
use crate::fields::FieldDescriptor;
use crate::meta::ModelMeta;

/// A comparison operator, named the way filter calls name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
	Exact,
	Not,
	Gt,
	Gte,
	Lt,
	Lte,
}

impl Operator {
	/// The logical complement, used when an exclusion is compiled:
	/// "NOT (x > v)" is worded as "x <= v".
	pub fn complement(self) -> Self {
		match self {
			Operator::Exact => Operator::Not,
			Operator::Not => Operator::Exact,
			Operator::Gt => Operator::Lte,
			Operator::Gte => Operator::Lt,
			Operator::Lt => Operator::Gte,
			Operator::Lte => Operator::Gt,
		}
	}

	/// Whether this operator compares magnitudes rather than identity.
	pub fn is_relational(self) -> bool {
		matches!(
			self,
			Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
		)
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Operator::Exact => "exact",
			Operator::Not => "not",
			Operator::Gt => "gt",
			Operator::Gte => "gte",
			Operator::Lt => "lt",
			Operator::Lte => "lte",
		};
		f.write_str(name)
	}
}

/// A literal a predicate compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
	Str(String),
	Integer(i64),
	Number(f64),
	Boolean(bool),
	Uuid(Uuid),
	DateTime(NaiveDateTime),
	Date(NaiveDate),
}

impl FilterValue {
	pub fn kind_name(&self) -> &'static str {
		match self {
			FilterValue::Str(_) => "string",
			FilterValue::Integer(_) => "integer",
			FilterValue::Number(_) => "number",
			FilterValue::Boolean(_) => "boolean",
			FilterValue::Uuid(_) => "uuid",
			FilterValue::DateTime(_) => "datetime",
			FilterValue::Date(_) => "date",
		}
	}

	/// Whether the value has a meaningful ordering on the wire. Strings
	/// and booleans are deliberately excluded: the backend grammar only
	/// orders numbers, dates and identifiers reliably.
	pub fn is_comparable(&self) -> bool {
		!matches!(self, FilterValue::Str(_) | FilterValue::Boolean(_))
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		FilterValue::Str(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		FilterValue::Str(value)
	}
}

impl From<i32> for FilterValue {
	fn from(value: i32) -> Self {
		FilterValue::Integer(value.into())
	}
}

impl From<i64> for FilterValue {
	fn from(value: i64) -> Self {
		FilterValue::Integer(value)
	}
}

impl From<f64> for FilterValue {
	fn from(value: f64) -> Self {
		FilterValue::Number(value)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		FilterValue::Boolean(value)
	}
}

impl From<Uuid> for FilterValue {
	fn from(value: Uuid) -> Self {
		FilterValue::Uuid(value)
	}
}

impl From<NaiveDateTime> for FilterValue {
	fn from(value: NaiveDateTime) -> Self {
		FilterValue::DateTime(value)
	}
}

impl From<NaiveDate> for FilterValue {
	fn from(value: NaiveDate) -> Self {
		FilterValue::Date(value)
	}
}

/// One validated filtering or exclusion condition.
#[derive(Debug, Clone)]
pub struct Predicate {
	pub field: &'static FieldDescriptor,
	pub op: Operator,
	pub value: FilterValue,
}

/// An immutable accumulation of predicates and an ordering key.
///
/// At most one predicate is kept per `(field, operator)` pair;
/// re-specifying the pair overwrites the previous value. Cloning a query
/// is cheap and is how chaining stays copy-on-write at the query-set
/// level.
#[derive(Debug, Clone)]
pub struct Query {
	meta: &'static ModelMeta,
	filter_by: BTreeMap<(&'static str, Operator), Predicate>,
	exclude_by: BTreeMap<(&'static str, Operator), Predicate>,
	order_by: Vec<&'static FieldDescriptor>,
}

impl Query {
	pub fn new(meta: &'static ModelMeta) -> Self {
		Self {
			meta,
			filter_by: BTreeMap::new(),
			exclude_by: BTreeMap::new(),
			order_by: Vec::new(),
		}
	}

	pub fn meta(&self) -> &'static ModelMeta {
		self.meta
	}

	/// Adds (or overwrites) a filter predicate.
	pub fn add_filter(
		&mut self,
		field: &str,
		op: Operator,
		value: FilterValue,
	) -> Result<(), ClientError> {
		let predicate = self.resolve(field, op, value)?;
		self.filter_by.insert((predicate.field.name, op), predicate);
		Ok(())
	}

	/// Adds (or overwrites) an exclusion predicate. The operator is
	/// stored as named; the compiler words the negation.
	pub fn add_exclude(
		&mut self,
		field: &str,
		op: Operator,
		value: FilterValue,
	) -> Result<(), ClientError> {
		let predicate = self.resolve(field, op, value)?;
		self.exclude_by
			.insert((predicate.field.name, op), predicate);
		Ok(())
	}

	/// Appends an ordering key. The backend sorts on a single key, so
	/// only the last appended entry is compiled.
	pub fn add_ordering(&mut self, field: &str) -> Result<(), ClientError> {
		let descriptor = self.lookup(field)?;
		if !descriptor.kind.is_filterable() {
			return Err(ClientError::InvalidOperand {
				field: field.to_string(),
				op: Operator::Exact,
				reason: format!("cannot order by a {:?} field", descriptor.kind),
			});
		}
		self.order_by.push(descriptor);
		Ok(())
	}

	pub fn filters(&self) -> impl Iterator<Item = &Predicate> {
		self.filter_by.values()
	}

	pub fn excludes(&self) -> impl Iterator<Item = &Predicate> {
		self.exclude_by.values()
	}

	/// The ordering key that will be compiled, if any.
	pub fn ordering(&self) -> Option<&'static FieldDescriptor> {
		self.order_by.last().copied()
	}

	pub fn is_empty(&self) -> bool {
		self.filter_by.is_empty() && self.exclude_by.is_empty() && self.order_by.is_empty()
	}

	fn lookup(&self, field: &str) -> Result<&'static FieldDescriptor, ClientError> {
		self.meta
			.field(field)
			.ok_or_else(|| ClientError::UnknownField {
				model: self.meta.name,
				field: field.to_string(),
			})
	}

	fn resolve(
		&self,
		field: &str,
		op: Operator,
		value: FilterValue,
	) -> Result<Predicate, ClientError> {
		let descriptor = self.lookup(field)?;
		if !descriptor.kind.is_filterable() {
			return Err(ClientError::InvalidOperand {
				field: field.to_string(),
				op,
				reason: format!("{:?} fields cannot be filtered on", descriptor.kind),
			});
		}
		if op.is_relational() && !value.is_comparable() {
			return Err(ClientError::InvalidOperand {
				field: field.to_string(),
				op,
				reason: format!("{} values have no ordering", value.kind_name()),
			});
		}
		Ok(Predicate {
			field: descriptor,
			op,
			value,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::FieldDescriptor;
	use crate::meta::{ModelMeta, Operation};
	use once_cell::sync::Lazy;

	static META: Lazy<ModelMeta> = Lazy::new(|| {
		ModelMeta::builder("Widget")
			.field(FieldDescriptor::uuid("id", "Id").read_only())
			.field(FieldDescriptor::string("name", "Name").required())
			.field(FieldDescriptor::integer("year", "Year"))
			.field(FieldDescriptor::nested("parent", "Parent"))
			.endpoint("/widgets", &[Operation::List])
			.paginated()
			.build()
	});

	#[test]
	fn test_unknown_field_is_rejected() {
		let mut query = Query::new(&META);
		let result = query.add_filter("nope", Operator::Exact, FilterValue::from(1));
		assert!(matches!(result, Err(ClientError::UnknownField { .. })));
	}

	#[test]
	fn test_relational_operator_rejects_strings_and_booleans() {
		let mut query = Query::new(&META);
		let result = query.add_filter("name", Operator::Gt, FilterValue::from("Ann"));
		assert!(matches!(result, Err(ClientError::InvalidOperand { .. })));

		let result = query.add_filter("year", Operator::Lte, FilterValue::from(true));
		assert!(matches!(result, Err(ClientError::InvalidOperand { .. })));
	}

	#[test]
	fn test_nested_fields_cannot_be_filtered() {
		let mut query = Query::new(&META);
		let result = query.add_filter("parent", Operator::Exact, FilterValue::from(1));
		assert!(matches!(result, Err(ClientError::InvalidOperand { .. })));
	}

	#[test]
	fn test_same_pair_overwrites() {
		let mut query = Query::new(&META);
		query
			.add_filter("year", Operator::Gt, FilterValue::from(2015))
			.unwrap();
		query
			.add_filter("year", Operator::Gt, FilterValue::from(2017))
			.unwrap();
		let predicates: Vec<_> = query.filters().collect();
		assert_eq!(predicates.len(), 1);
		assert_eq!(predicates[0].value, FilterValue::Integer(2017));
	}

	#[test]
	fn test_different_operators_coexist() {
		let mut query = Query::new(&META);
		query
			.add_filter("year", Operator::Gte, FilterValue::from(2015))
			.unwrap();
		query
			.add_filter("year", Operator::Lt, FilterValue::from(2020))
			.unwrap();
		assert_eq!(query.filters().count(), 2);
	}

	#[test]
	fn test_last_ordering_wins() {
		let mut query = Query::new(&META);
		query.add_ordering("name").unwrap();
		query.add_ordering("year").unwrap();
		assert_eq!(query.ordering().unwrap().name, "year");
	}

	#[test]
	fn test_complement_is_an_involution() {
		for op in [
			Operator::Exact,
			Operator::Not,
			Operator::Gt,
			Operator::Gte,
			Operator::Lt,
			Operator::Lte,
		] {
			assert_eq!(op.complement().complement(), op);
		}
	}
}
