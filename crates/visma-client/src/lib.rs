//! The HTTP transport for the eAccounting client.
//!
//! [`VismaClient`] implements [`visma_core::Transport`] on top of
//! reqwest: it prefixes the environment's API root, carries the OAuth2
//! bearer token (refreshing it through the identity server when it has
//! expired, and persisting the refreshed set), and translates any
//! non-success status into [`visma_core::Error::Api`] before a response
//! reaches the core.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use visma_client::{ClientConfig, VismaClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = VismaClient::connect(config).await?;
//! visma_core::init_transport(Arc::new(client))?;
//! ```

mod config;
mod token;

pub use config::{API_URL, API_URL_SANDBOX, ClientConfig, TOKEN_URL, TOKEN_URL_SANDBOX};
pub use token::TokenSet;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::token::TokenResponse;
use visma_core::{ApiResponse, Error, Result, Transport};

/// A bearer-authenticated transport against one eAccounting environment.
pub struct VismaClient {
	http: reqwest::Client,
	config: ClientConfig,
	token: Mutex<TokenSet>,
}

impl VismaClient {
	/// Loads the persisted token set and refreshes it right away if it
	/// has already expired, so the first request does not pay for it.
	pub async fn connect(config: ClientConfig) -> Result<Self> {
		let token = TokenSet::load(&config.credentials_path)?;
		let client = Self::from_parts(config, token);
		client.ensure_fresh_token().await?;
		Ok(client)
	}

	/// A client over an already-loaded token set. Nothing is validated
	/// until the first request.
	pub fn from_parts(config: ClientConfig, token: TokenSet) -> Self {
		Self {
			http: reqwest::Client::new(),
			config,
			token: Mutex::new(token),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.config.api_url(), path)
	}

	/// The current access token, refreshed and persisted first when the
	/// stored one has run out.
	async fn ensure_fresh_token(&self) -> Result<String> {
		let mut token = self.token.lock().await;
		if token.is_expired() {
			tracing::info!("access token expired, refreshing");
			let refreshed = self.refresh(&token).await?;
			refreshed.save(&self.config.credentials_path)?;
			*token = refreshed;
		}
		Ok(token.access_token.clone())
	}

	async fn refresh(&self, current: &TokenSet) -> Result<TokenSet> {
		let params = [
			("grant_type", "refresh_token"),
			("refresh_token", current.refresh_token.as_str()),
		];
		let response = self
			.http
			.post(self.config.token_url())
			.basic_auth(&self.config.client_id, Some(&self.config.client_secret))
			.form(&params)
			.send()
			.await
			.map_err(|e| Error::Transport(e.to_string()))?;

		let status = response.status().as_u16();
		if !(200..300).contains(&status) {
			let body = read_body(response).await;
			tracing::error!(status, "token refresh rejected");
			return Err(Error::Api { status, body });
		}
		let granted: TokenResponse = response
			.json()
			.await
			.map_err(|e| Error::Decode(e.to_string()))?;
		Ok(TokenSet::from_response(granted))
	}

	async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
		let bearer = self.ensure_fresh_token().await?;
		let response = request
			.bearer_auth(bearer)
			.send()
			.await
			.map_err(|e| Error::Transport(e.to_string()))?;

		let status = response.status().as_u16();
		let body = read_body(response).await;
		if !(200..300).contains(&status) {
			tracing::error!(status, "request rejected");
			return Err(Error::Api { status, body });
		}
		Ok(ApiResponse::new(status, body))
	}
}

/// Reads a body as JSON, tolerating the empty bodies delete answers
/// with and the occasional non-JSON error page.
async fn read_body(response: reqwest::Response) -> Value {
	match response.text().await {
		Ok(text) if text.is_empty() => Value::Null,
		Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
		Err(_) => Value::Null,
	}
}

#[async_trait]
impl Transport for VismaClient {
	async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse> {
		tracing::debug!(%path, "GET");
		self.send(self.http.get(self.url(path)).query(params)).await
	}

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
		tracing::debug!(%path, "POST");
		self.send(self.http.post(self.url(path)).json(&body)).await
	}

	async fn put(&self, path: &str, body: Value) -> Result<ApiResponse> {
		tracing::debug!(%path, "PUT");
		self.send(self.http.put(self.url(path)).json(&body)).await
	}

	async fn delete(&self, path: &str) -> Result<ApiResponse> {
		tracing::debug!(%path, "DELETE");
		self.send(self.http.delete(self.url(path))).await
	}
}
