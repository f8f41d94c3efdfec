//! Credentials for the remote database endpoint.
//!
//! The executor never reads the process environment itself; callers build a
//! [`RemoteCredentials`] (usually via [`RemoteCredentials::from_env`] at the
//! CLI boundary) and pass it into the builder explicitly.

use crate::error::{LinkError, Result};

/// Environment variable holding the provider API token.
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Environment variable holding the provider account identifier.
pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";
/// Environment variable holding the database identifier.
pub const ENV_DATABASE_ID: &str = "CLOUDFLARE_DATABASE_ID";

/// Credentials for the remote query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    /// Bearer token for the `Authorization` header
    pub api_token: String,

    /// Account identifier, part of the endpoint path
    pub account_id: String,

    /// Database identifier, part of the endpoint path
    pub database_id: String,
}

impl RemoteCredentials {
    pub fn new(
        api_token: impl Into<String>,
        account_id: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: account_id.into(),
            database_id: database_id.into(),
        }
    }

    /// Read credentials from the environment.
    ///
    /// Fails with a [`LinkError::Config`] naming the first missing variable,
    /// before any network call is made. Placeholder values left over from a
    /// template `.env` are rejected the same way.
    pub fn from_env() -> Result<Self> {
        let credentials = Self {
            api_token: require_env(ENV_API_TOKEN)?,
            account_id: require_env(ENV_ACCOUNT_ID)?,
            database_id: require_env(ENV_DATABASE_ID)?,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Reject placeholder values left over from a template `.env` file.
    pub fn validate(&self) -> Result<()> {
        if self.account_id == "your_account_id_here" || self.api_token.contains("your_") {
            return Err(LinkError::Config(
                "credentials still contain placeholder values; \
                 set real values for CLOUDFLARE_API_TOKEN and CLOUDFLARE_ACCOUNT_ID"
                    .to_string(),
            ));
        }
        if self.database_id == "your_database_id_here" {
            return Err(LinkError::Config(
                "CLOUDFLARE_DATABASE_ID still contains a placeholder value".to_string(),
            ));
        }
        Ok(())
    }

    /// First few characters of the token, safe to print.
    pub fn token_preview(&self) -> String {
        let prefix: String = self.api_token.chars().take(10).collect();
        format!("{}...", prefix)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LinkError::Config(format!("missing required environment variable {name}")))
}
