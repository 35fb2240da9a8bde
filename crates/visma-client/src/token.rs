//! OAuth2 token persistence.
//!
//! eAccounting hands out short-lived bearer tokens with a refresh token.
//! The set is kept as a small JSON file next to the application so a
//! process restart does not force a new authorization round.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use visma_core::{ClientError, Error, Result};

/// A minute of slack so a token is refreshed before it actually runs
/// out, absorbing clock drift between client and identity server.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// An access/refresh token pair with its expiry time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
	pub access_token: String,
	pub refresh_token: String,
	pub expires: DateTime<Utc>,
}

/// The identity server's answer to a token grant.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub access_token: String,
	pub refresh_token: String,
	pub expires_in: i64,
}

impl TokenSet {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path).map_err(|e| {
			Error::Client(ClientError::Configuration(format!(
				"cannot read credentials at {}: {e}",
				path.display()
			)))
		})?;
		serde_json::from_str(&raw).map_err(|e| {
			Error::Client(ClientError::Configuration(format!(
				"credentials at {} are malformed: {e}",
				path.display()
			)))
		})
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let raw = serde_json::to_string_pretty(self)
			.map_err(|e| Error::Client(ClientError::Configuration(e.to_string())))?;
		fs::write(path, raw).map_err(|e| {
			Error::Client(ClientError::Configuration(format!(
				"cannot write credentials to {}: {e}",
				path.display()
			)))
		})
	}

	pub fn is_expired(&self) -> bool {
		Utc::now() >= self.expires
	}

	pub(crate) fn from_response(response: TokenResponse) -> Self {
		let lifetime = Duration::seconds(response.expires_in - EXPIRY_MARGIN_SECONDS);
		Self {
			access_token: response.access_token,
			refresh_token: response.refresh_token,
			expires: Utc::now() + lifetime,
		}
	}
}
