//! Client configuration.

use std::env;
use std::path::PathBuf;

use visma_core::{ClientError, Result};

/// Production API root.
pub const API_URL: &str = "https://eaccountingapi.vismaonline.com/v2";
/// Sandbox API root.
pub const API_URL_SANDBOX: &str = "https://eaccountingapi-sandbox.test.vismaonline.com/v2";
/// Production OAuth2 token endpoint.
pub const TOKEN_URL: &str = "https://identity.vismaonline.com/connect/token";
/// Sandbox OAuth2 token endpoint.
pub const TOKEN_URL_SANDBOX: &str =
	"https://identity-sandbox.test.vismaonline.com/connect/token";

/// Everything the transport needs to talk to eAccounting: the OAuth2
/// application credentials, where the token set is persisted, and which
/// environment to address.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub client_id: String,
	pub client_secret: String,
	/// Where the token set is loaded from and saved back to.
	pub credentials_path: PathBuf,
	pub sandbox: bool,
}

impl ClientConfig {
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		credentials_path: impl Into<PathBuf>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			credentials_path: credentials_path.into(),
			sandbox: false,
		}
	}

	pub fn sandbox(mut self, sandbox: bool) -> Self {
		self.sandbox = sandbox;
		self
	}

	/// Reads `VISMA_CLIENT_ID`, `VISMA_CLIENT_SECRET`,
	/// `VISMA_CREDENTIALS_PATH` and the optional `VISMA_SANDBOX` flag.
	pub fn from_env() -> Result<Self> {
		let required = |name: &str| -> Result<String> {
			env::var(name)
				.map_err(|_| ClientError::Configuration(format!("{name} is not set")).into())
		};
		let sandbox = matches!(
			env::var("VISMA_SANDBOX").as_deref(),
			Ok("1") | Ok("true") | Ok("yes")
		);
		Ok(Self {
			client_id: required("VISMA_CLIENT_ID")?,
			client_secret: required("VISMA_CLIENT_SECRET")?,
			credentials_path: PathBuf::from(required("VISMA_CREDENTIALS_PATH")?),
			sandbox,
		})
	}

	pub fn api_url(&self) -> &'static str {
		if self.sandbox { API_URL_SANDBOX } else { API_URL }
	}

	pub fn token_url(&self) -> &'static str {
		if self.sandbox { TOKEN_URL_SANDBOX } else { TOKEN_URL }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	fn clear_env() {
		for name in [
			"VISMA_CLIENT_ID",
			"VISMA_CLIENT_SECRET",
			"VISMA_CREDENTIALS_PATH",
			"VISMA_SANDBOX",
		] {
			unsafe { env::remove_var(name) };
		}
	}

	#[test]
	#[serial]
	fn test_from_env_reads_all_variables() {
		clear_env();
		unsafe {
			env::set_var("VISMA_CLIENT_ID", "client");
			env::set_var("VISMA_CLIENT_SECRET", "secret");
			env::set_var("VISMA_CREDENTIALS_PATH", "/tmp/tokens.json");
			env::set_var("VISMA_SANDBOX", "1");
		}

		let config = ClientConfig::from_env().unwrap();
		assert_eq!(config.client_id, "client");
		assert!(config.sandbox);
		assert_eq!(config.api_url(), API_URL_SANDBOX);
		assert_eq!(config.token_url(), TOKEN_URL_SANDBOX);
		clear_env();
	}

	#[test]
	#[serial]
	fn test_from_env_requires_the_credentials() {
		clear_env();
		let result = ClientConfig::from_env();
		assert!(result.is_err());
	}

	#[test]
	fn test_production_is_the_default_environment() {
		let config = ClientConfig::new("id", "secret", "/tmp/tokens.json");
		assert!(!config.sandbox);
		assert_eq!(config.api_url(), API_URL);
		assert_eq!(config.token_url(), TOKEN_URL);
	}
}
