//! Query compilation.
//!
//! A compiler turns a [`Query`] into the pair of wire parameters the
//! transport attaches to a list request. Rendering is pluggable per
//! backend: the trait supplies the parameter names, the
//! operator-to-symbol table and the literal renderer, while the default
//! methods hold the backend-independent walk over the query. Exclusions
//! are compiled through [`Operator::complement`] and then rendered with
//! the filter-side table, so `exclude(x__gt=5)` and `filter(x__lte=5)`
//! produce identical fragments.

use crate::fields::FieldKind;
use crate::query::{FilterValue, Operator, Predicate, Query};

/// Translates queries into backend wire parameters.
pub trait QueryCompiler: Send + Sync {
	/// Name of the filter-expression parameter.
	fn filter_param(&self) -> &'static str;

	/// Name of the ordering parameter.
	fn order_param(&self) -> &'static str;

	/// Name of the page-number parameter.
	fn page_param(&self) -> &'static str;

	/// Name of the page-size parameter.
	fn page_size_param(&self) -> &'static str;

	/// The comparison symbol for one operator.
	fn comparison(&self, op: Operator) -> &'static str;

	/// Renders a literal according to the field's declared kind. String
	/// fields are quoted; identifiers, numbers, booleans and dates are
	/// rendered bare.
	fn render_value(&self, kind: FieldKind, value: &FilterValue) -> String;

	/// The conjunction between predicate fragments.
	fn conjunction(&self) -> &'static str {
		" and "
	}

	/// Renders one predicate with an explicit operator (which differs
	/// from `predicate.op` when an exclusion is being complemented).
	fn render_predicate(&self, predicate: &Predicate, op: Operator) -> String {
		format!(
			"{} {} {}",
			predicate.field.wire_key,
			self.comparison(op),
			self.render_value(predicate.field.kind, &predicate.value)
		)
	}

	/// Compiles a query into `(parameter, value)` pairs. Parameters whose
	/// source is empty are omitted entirely.
	fn compile(&self, query: &Query) -> Vec<(String, String)> {
		let mut fragments: Vec<String> = Vec::new();
		for predicate in query.filters() {
			fragments.push(self.render_predicate(predicate, predicate.op));
		}
		for predicate in query.excludes() {
			fragments.push(self.render_predicate(predicate, predicate.op.complement()));
		}

		let mut params = Vec::new();
		if !fragments.is_empty() {
			params.push((
				self.filter_param().to_string(),
				fragments.join(self.conjunction()),
			));
		}
		if let Some(descriptor) = query.ordering() {
			params.push((self.order_param().to_string(), descriptor.wire_key.to_string()));
		}
		params
	}
}

/// The eAccounting flavour of OData query options.
///
/// Filters go into `$filter` with `eq`/`ne`/`gt`/`ge`/`lt`/`le`
/// comparisons, ordering into `$orderby`, and pagination into `$page` /
/// `$pagesize`. String literals are single-quoted with embedded quotes
/// doubled; GUIDs and numbers are bare.
#[derive(Debug, Clone, Copy, Default)]
pub struct ODataCompiler;

impl QueryCompiler for ODataCompiler {
	fn filter_param(&self) -> &'static str {
		"$filter"
	}

	fn order_param(&self) -> &'static str {
		"$orderby"
	}

	fn page_param(&self) -> &'static str {
		"$page"
	}

	fn page_size_param(&self) -> &'static str {
		"$pagesize"
	}

	fn comparison(&self, op: Operator) -> &'static str {
		match op {
			Operator::Exact => "eq",
			Operator::Not => "ne",
			Operator::Gt => "gt",
			Operator::Gte => "ge",
			Operator::Lt => "lt",
			Operator::Lte => "le",
		}
	}

	fn render_value(&self, kind: FieldKind, value: &FilterValue) -> String {
		match value {
			FilterValue::Str(text) => {
				if kind == FieldKind::Str {
					format!("'{}'", text.replace('\'', "''"))
				} else {
					// A string handed to a non-string field (a GUID or a
					// date passed as text) is an identifier in the
					// grammar, not a quoted literal.
					text.clone()
				}
			}
			FilterValue::Integer(value) => value.to_string(),
			FilterValue::Number(value) => value.to_string(),
			FilterValue::Boolean(value) => value.to_string(),
			FilterValue::Uuid(value) => value.to_string(),
			FilterValue::DateTime(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
			FilterValue::Date(value) => value.format("%Y-%m-%d").to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::FieldDescriptor;
	use crate::meta::{ModelMeta, Operation};
	use once_cell::sync::Lazy;
	use rstest::rstest;
	use uuid::Uuid;

	static META: Lazy<ModelMeta> = Lazy::new(|| {
		ModelMeta::builder("Widget")
			.field(FieldDescriptor::uuid("id", "Id"))
			.field(FieldDescriptor::string("name", "Name"))
			.field(FieldDescriptor::integer("year", "Year"))
			.field(FieldDescriptor::number("count", "Count"))
			.field(FieldDescriptor::boolean("is_active", "IsActive"))
			.endpoint("/widgets", &[Operation::List])
			.paginated()
			.build()
	});

	fn compile(query: &Query) -> Vec<(String, String)> {
		ODataCompiler.compile(query)
	}

	#[rstest]
	#[case(Operator::Exact, "eq")]
	#[case(Operator::Not, "ne")]
	#[case(Operator::Gt, "gt")]
	#[case(Operator::Gte, "ge")]
	#[case(Operator::Lt, "lt")]
	#[case(Operator::Lte, "le")]
	fn test_comparison_table(#[case] op: Operator, #[case] symbol: &str) {
		assert_eq!(ODataCompiler.comparison(op), symbol);
	}

	#[test]
	fn test_string_literals_are_quoted() {
		let mut query = Query::new(&META);
		query
			.add_filter("name", Operator::Exact, FilterValue::from("Ann"))
			.unwrap();
		let params = compile(&query);
		assert_eq!(params, vec![("$filter".to_string(), "Name eq 'Ann'".to_string())]);
	}

	#[test]
	fn test_embedded_quotes_are_doubled() {
		let mut query = Query::new(&META);
		query
			.add_filter("name", Operator::Exact, FilterValue::from("O'Hare"))
			.unwrap();
		let params = compile(&query);
		assert_eq!(params[0].1, "Name eq 'O''Hare'");
	}

	#[test]
	fn test_identifiers_and_numbers_are_bare() {
		let id = Uuid::nil();
		let mut query = Query::new(&META);
		query
			.add_filter("id", Operator::Exact, FilterValue::from(id))
			.unwrap();
		query
			.add_filter("count", Operator::Gt, FilterValue::from(3))
			.unwrap();
		let params = compile(&query);
		assert_eq!(
			params[0].1,
			format!("Count gt 3 and Id eq {id}")
		);
	}

	#[test]
	fn test_booleans_are_bare() {
		let mut query = Query::new(&META);
		query
			.add_filter("is_active", Operator::Exact, FilterValue::from(true))
			.unwrap();
		let params = compile(&query);
		assert_eq!(params[0].1, "IsActive eq true");
	}

	#[test]
	fn test_exclude_compiles_to_the_complement() {
		let mut excluded = Query::new(&META);
		excluded
			.add_exclude("year", Operator::Gt, FilterValue::from(2017))
			.unwrap();

		let mut filtered = Query::new(&META);
		filtered
			.add_filter("year", Operator::Lte, FilterValue::from(2017))
			.unwrap();

		assert_eq!(compile(&excluded), compile(&filtered));
	}

	#[test]
	fn test_exclude_exact_equals_filter_not() {
		let mut excluded = Query::new(&META);
		excluded
			.add_exclude("year", Operator::Exact, FilterValue::from(2017))
			.unwrap();

		let mut filtered = Query::new(&META);
		filtered
			.add_filter("year", Operator::Not, FilterValue::from(2017))
			.unwrap();

		assert_eq!(compile(&excluded), compile(&filtered));
	}

	#[test]
	fn test_predicates_join_with_and() {
		let mut query = Query::new(&META);
		query
			.add_filter("name", Operator::Exact, FilterValue::from("Ann"))
			.unwrap();
		query
			.add_filter("year", Operator::Lt, FilterValue::from(2020))
			.unwrap();
		let params = compile(&query);
		assert_eq!(params[0].1, "Name eq 'Ann' and Year lt 2020");
	}

	#[test]
	fn test_ordering_renders_the_wire_key() {
		let mut query = Query::new(&META);
		query.add_ordering("is_active").unwrap();
		query.add_ordering("name").unwrap();
		let params = compile(&query);
		assert_eq!(params, vec![("$orderby".to_string(), "Name".to_string())]);
	}

	#[test]
	fn test_empty_query_compiles_to_nothing() {
		let query = Query::new(&META);
		assert!(compile(&query).is_empty());
	}
}
