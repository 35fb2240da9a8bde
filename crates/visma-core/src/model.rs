//! The model traits.
//!
//! [`Model`] ties a plain serde struct to its declared metadata;
//! [`ApiModel`] adds the endpoint-facing surface: the primary key, the
//! `objects()` manager accessor and the active-record `save`/`delete`
//! methods. Pure value objects (sub-structures that only ever travel
//! nested inside another resource) implement `Model` alone and never get
//! a manager.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{ClientError, Result};
use crate::manager::Manager;
use crate::meta::ModelMeta;

/// A declared resource or value object.
pub trait Model: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
	/// The metadata built once for this type.
	fn meta() -> &'static ModelMeta;
}

/// A resource with a remote endpoint.
#[async_trait]
pub trait ApiModel: Model {
	/// The primary-key type, rendered into `{path}/{id}` URLs.
	type Pk: fmt::Display + Clone + Send + Sync;

	/// The server-assigned id, `None` while unsaved.
	fn pk(&self) -> Option<&Self::Pk>;

	/// The manager for this resource, using the process-wide transport.
	fn objects() -> Manager<Self>
	where
		Self: Sized,
	{
		Manager::new()
	}

	/// Creates or updates the remote resource, then adopts every field
	/// of the decoded server instance, including server-computed values
	/// such as a freshly assigned id.
	async fn save(&mut self) -> Result<()>
	where
		Self: Sized,
	{
		let saved = match self.pk() {
			None => Self::objects().create(self).await?,
			Some(_) => Self::objects().update(self).await?,
		};
		*self = saved;
		Ok(())
	}

	/// Deletes the remote resource. The in-memory instance is left
	/// untouched; the remote record and the local object have separate
	/// lifetimes and the caller discards the object when done with it.
	async fn delete(&self) -> Result<()>
	where
		Self: Sized,
	{
		match self.pk() {
			Some(pk) => Self::objects().delete(pk).await,
			None => Err(ClientError::MissingField {
				model: Self::meta().name,
				field: "id".to_string(),
			}
			.into()),
		}
	}
}
