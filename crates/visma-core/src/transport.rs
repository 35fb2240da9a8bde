//! The transport boundary.
//!
//! Managers never speak HTTP themselves; they go through a [`Transport`].
//! The production implementation (reqwest + OAuth2) lives in
//! `visma-client`; tests inject fakes. A transport is expected to have
//! translated a non-success status into [`crate::Error::Api`] before a
//! response reaches the core, and to already carry valid credentials;
//! the core never inspects tokens.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ClientError, Result};

/// A decoded HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
	pub status: u16,
	pub body: Value,
}

impl ApiResponse {
	pub fn new(status: u16, body: Value) -> Self {
		Self { status, body }
	}
}

/// The HTTP operations the core needs.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse>;

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse>;

	async fn put(&self, path: &str, body: Value) -> Result<ApiResponse>;

	async fn delete(&self, path: &str) -> Result<ApiResponse>;
}

static TRANSPORT: OnceCell<Arc<dyn Transport>> = OnceCell::new();

/// Registers the process-wide transport used by `Model::objects()`.
///
/// Call once at startup, before any manager is used. Managers built with
/// [`crate::Manager::with_transport`] bypass the global entirely.
pub fn init_transport(transport: Arc<dyn Transport>) -> Result<()> {
	TRANSPORT
		.set(transport)
		.map_err(|_| ClientError::Configuration("transport already initialized".into()).into())
}

/// The registered transport, or [`ClientError::NotInitialized`].
pub fn global_transport() -> Result<Arc<dyn Transport>> {
	TRANSPORT
		.get()
		.cloned()
		.ok_or_else(|| ClientError::NotInitialized.into())
}
