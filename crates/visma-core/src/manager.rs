//! The per-resource gateway.
//!
//! A [`Manager`] is the single authorized way in and out of one resource
//! type: it checks the endpoint contract's allowed-operation set before
//! anything else happens, translates between wire JSON and instances
//! through the model's schema, and hands out [`QuerySet`]s for bulk
//! reads. No operation reaches the transport unless the contract allows
//! it.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::compiler::{ODataCompiler, QueryCompiler};
use crate::error::{ClientError, Result};
use crate::meta::{EndpointContract, Operation};
use crate::model::ApiModel;
use crate::query::{FilterValue, Operator};
use crate::queryset::QuerySet;
use crate::transport::{Transport, global_transport};

/// The gateway bound to one resource type.
///
/// Reached through `Model::objects()` in normal use; tests and
/// alternative backends construct their own with
/// [`Manager::with_transport`] or [`Manager::with_parts`].
pub struct Manager<M: ApiModel> {
	transport: Option<Arc<dyn Transport>>,
	compiler: Arc<dyn QueryCompiler>,
	_marker: PhantomData<M>,
}

impl<M: ApiModel> Clone for Manager<M> {
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			compiler: Arc::clone(&self.compiler),
			_marker: PhantomData,
		}
	}
}

impl<M: ApiModel> Manager<M> {
	/// A manager that resolves the process-wide transport on each call.
	pub fn new() -> Self {
		Self {
			transport: None,
			compiler: Arc::new(ODataCompiler),
			_marker: PhantomData,
		}
	}

	/// A manager bound to an explicit transport.
	pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
		Self {
			transport: Some(transport),
			compiler: Arc::new(ODataCompiler),
			_marker: PhantomData,
		}
	}

	/// A manager bound to an explicit transport and query compiler, for
	/// backends with a different wire grammar.
	pub fn with_parts(transport: Arc<dyn Transport>, compiler: Arc<dyn QueryCompiler>) -> Self {
		Self {
			transport: Some(transport),
			compiler,
			_marker: PhantomData,
		}
	}

	pub(crate) fn transport(&self) -> Result<Arc<dyn Transport>> {
		match &self.transport {
			Some(transport) => Ok(Arc::clone(transport)),
			None => global_transport(),
		}
	}

	pub(crate) fn compiler(&self) -> Arc<dyn QueryCompiler> {
		Arc::clone(&self.compiler)
	}

	/// The contract, provided `operation` is in its allowed set. This is
	/// the whitelist gate: it runs synchronously, before any I/O.
	fn allowed(operation: Operation) -> Result<&'static EndpointContract> {
		let contract = M::meta().contract()?;
		if contract.allows(operation) {
			Ok(contract)
		} else {
			Err(ClientError::MethodNotAllowed {
				model: M::meta().name,
				operation,
			}
			.into())
		}
	}

	/// Fetches one instance by id.
	pub async fn get(&self, pk: &M::Pk) -> Result<M> {
		let contract = Self::allowed(Operation::Get)?;
		let path = format!("{}/{}", contract.path, pk);
		tracing::debug!(model = M::meta().name, %path, "get");
		let response = self.transport()?.get(&path, &[]).await?;
		M::meta().decode(response.body)
	}

	/// Creates the resource remotely and returns the decoded server
	/// instance. The caller (usually `save()`) is responsible for copying
	/// the returned values, notably the assigned id, back onto its own
	/// instance.
	pub async fn create(&self, instance: &M) -> Result<M> {
		let contract = Self::allowed(Operation::Create)?;
		let body = M::meta().encode(instance)?;
		tracing::debug!(model = M::meta().name, path = contract.path, "create");
		let response = self.transport()?.post(contract.path, body).await?;
		M::meta().decode(response.body)
	}

	/// Replaces the remote resource with `instance` and returns the
	/// decoded result. The instance must already have an id.
	pub async fn update(&self, instance: &M) -> Result<M> {
		let contract = Self::allowed(Operation::Update)?;
		let pk = instance.pk().ok_or_else(|| ClientError::MissingField {
			model: M::meta().name,
			field: "id".to_string(),
		})?;
		let body = M::meta().encode(instance)?;
		let path = format!("{}/{}", contract.path, pk);
		tracing::debug!(model = M::meta().name, %path, "update");
		let response = self.transport()?.put(&path, body).await?;
		M::meta().decode(response.body)
	}

	/// Deletes the remote resource by id.
	pub async fn delete(&self, pk: &M::Pk) -> Result<()> {
		let contract = Self::allowed(Operation::Delete)?;
		let path = format!("{}/{}", contract.path, pk);
		tracing::debug!(model = M::meta().name, %path, "delete");
		self.transport()?.delete(&path).await?;
		Ok(())
	}

	/// An unconstrained query set over the list endpoint.
	pub fn all(&self) -> Result<QuerySet<M>> {
		Self::allowed(Operation::List)?;
		Ok(QuerySet::new(self.clone()))
	}

	/// Shorthand for `all()` plus an exact-match filter.
	pub fn filter(&self, field: &str, value: impl Into<FilterValue>) -> Result<QuerySet<M>> {
		self.all()?.filter(field, value)
	}

	/// Shorthand for `all()` plus a filter with an explicit operator.
	pub fn filter_op(
		&self,
		field: &str,
		op: Operator,
		value: impl Into<FilterValue>,
	) -> Result<QuerySet<M>> {
		self.all()?.filter_op(field, op, value)
	}

	/// Shorthand for `all()` plus an exact-match exclusion.
	pub fn exclude(&self, field: &str, value: impl Into<FilterValue>) -> Result<QuerySet<M>> {
		self.all()?.exclude(field, value)
	}

	/// Shorthand for `all()` plus an exclusion with an explicit operator.
	pub fn exclude_op(
		&self,
		field: &str,
		op: Operator,
		value: impl Into<FilterValue>,
	) -> Result<QuerySet<M>> {
		self.all()?.exclude_op(field, op, value)
	}

	/// Shorthand for `all()` plus an ordering key.
	pub fn order_by(&self, field: &str) -> Result<QuerySet<M>> {
		self.all()?.order_by(field)
	}
}

impl<M: ApiModel> Default for Manager<M> {
	fn default() -> Self {
		Self::new()
	}
}
