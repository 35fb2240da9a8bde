//! The lazy, paginated cursor.
//!
//! A [`QuerySet`] holds a manager and a query and does nothing until a
//! terminal method asks for data. The first materialization drains the
//! list endpoint page by page (or decodes the single response of an
//! unpaginated endpoint) and caches the decoded instances on the set;
//! every later read is served from the cache. Chaining never mutates an
//! existing set; each call hands back a fresh, unevaluated one.

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{Error, Result};
use crate::manager::Manager;
use crate::model::ApiModel;
use crate::query::{FilterValue, Operator, Query};

/// Items fetched per page unless overridden with
/// [`QuerySet::page_size`].
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A lazy, cache-once view over a list endpoint.
pub struct QuerySet<M: ApiModel> {
	manager: Manager<M>,
	query: Query,
	page_size: u32,
	cache: OnceCell<Vec<M>>,
}

impl<M: ApiModel> QuerySet<M> {
	pub(crate) fn new(manager: Manager<M>) -> Self {
		Self {
			manager,
			query: Query::new(M::meta()),
			page_size: DEFAULT_PAGE_SIZE,
			cache: OnceCell::new(),
		}
	}

	/// A copy of this set with the same query and an empty cache.
	fn chain(&self) -> Self {
		Self {
			manager: self.manager.clone(),
			query: self.query.clone(),
			page_size: self.page_size,
			cache: OnceCell::new(),
		}
	}

	/// The accumulated query, mainly useful for inspection in tests.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// A new set with an exact-match filter added.
	pub fn filter(&self, field: &str, value: impl Into<FilterValue>) -> Result<Self> {
		self.filter_op(field, Operator::Exact, value)
	}

	/// A new set with a filter predicate added. Re-specifying a
	/// `(field, operator)` pair overwrites the earlier value.
	pub fn filter_op(
		&self,
		field: &str,
		op: Operator,
		value: impl Into<FilterValue>,
	) -> Result<Self> {
		let mut next = self.chain();
		next.query.add_filter(field, op, value.into())?;
		Ok(next)
	}

	/// A new set excluding exact matches.
	pub fn exclude(&self, field: &str, value: impl Into<FilterValue>) -> Result<Self> {
		self.exclude_op(field, Operator::Exact, value)
	}

	/// A new set with an exclusion predicate added. The operator keeps
	/// its filter-side name; the compiler words the negation.
	pub fn exclude_op(
		&self,
		field: &str,
		op: Operator,
		value: impl Into<FilterValue>,
	) -> Result<Self> {
		let mut next = self.chain();
		next.query.add_exclude(field, op, value.into())?;
		Ok(next)
	}

	/// A new set sorted on `field`. The backend sorts on one key; the
	/// last `order_by` in a chain wins.
	pub fn order_by(&self, field: &str) -> Result<Self> {
		let mut next = self.chain();
		next.query.add_ordering(field)?;
		Ok(next)
	}

	/// A new set requesting `size` items per page.
	pub fn page_size(&self, size: u32) -> Self {
		let mut next = self.chain();
		next.page_size = size;
		next
	}

	/// Materializes the set if needed and returns the full result.
	pub async fn results(&self) -> Result<&[M]> {
		Ok(self.fetch().await?.as_slice())
	}

	/// The number of fetched items.
	pub async fn count(&self) -> Result<usize> {
		Ok(self.fetch().await?.len())
	}

	/// Whether the set matched anything at all.
	pub async fn exists(&self) -> Result<bool> {
		Ok(!self.fetch().await?.is_empty())
	}

	/// The first item, or `None` for an empty result.
	pub async fn first(&self) -> Result<Option<M>> {
		Ok(self.fetch().await?.first().cloned())
	}

	/// The item at `index`, or `None` past the end.
	pub async fn nth(&self, index: usize) -> Result<Option<M>> {
		Ok(self.fetch().await?.get(index).cloned())
	}

	async fn fetch(&self) -> Result<&Vec<M>> {
		self.cache.get_or_try_init(|| self.fetch_all()).await
	}

	/// One full evaluation: compile the query, then drain the endpoint.
	async fn fetch_all(&self) -> Result<Vec<M>> {
		let meta = M::meta();
		let contract = meta.contract()?;
		let compiler = self.manager.compiler();
		let transport = self.manager.transport()?;
		let base = compiler.compile(&self.query);

		let Some(envelope) = &contract.envelope else {
			// No envelope declared: the endpoint answers with the whole
			// result in one response, either a bare object or an array.
			let response = transport.get(contract.path, &base).await?;
			return match response.body {
				Value::Array(items) => {
					items.into_iter().map(|item| meta.decode(item)).collect()
				}
				body @ Value::Object(_) => Ok(vec![meta.decode(body)?]),
				other => Err(Error::Decode(format!(
					"{}: expected an object or array, got {other}",
					meta.name
				))),
			};
		};

		let mut items = Vec::new();
		let mut page: u32 = 1;
		loop {
			let mut params = base.clone();
			params.push((compiler.page_size_param().to_string(), self.page_size.to_string()));
			params.push((compiler.page_param().to_string(), page.to_string()));

			let response = transport.get(contract.path, &params).await?;
			let (page_items, page_meta) = envelope.unwrap_page(response.body)?;
			tracing::debug!(
				model = meta.name,
				page,
				of = page_meta.total_number_of_pages,
				items = page_items.len(),
				"fetched page"
			);

			// An empty page ends the walk even when the reported page
			// count disagrees; the metadata is not trusted past the data.
			if page_items.is_empty() {
				break;
			}
			for item in page_items {
				items.push(meta.decode(item)?);
			}
			if page >= page_meta.total_number_of_pages {
				break;
			}
			page += 1;
		}
		Ok(items)
	}
}
