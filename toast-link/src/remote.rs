//! SQL execution against the remote database's HTTP query endpoint.

use async_trait::async_trait;
use log::{debug, warn};

use crate::credentials::RemoteCredentials;
use crate::database::Database;
use crate::error::{LinkError, Result};
use crate::models::{QueryResponse, Row, SqlStatement};

/// Base URL of the provider API.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Executes statements against the remote query endpoint.
///
/// Each call is a single `POST
/// {base}/accounts/{account}/d1/database/{database}/query` with bearer-token
/// auth. No retries, no pagination; a multi-statement call's result beyond
/// the first set is discarded (see [`QueryResponse::into_rows`]).
///
/// # Examples
///
/// ```rust,no_run
/// use toast_link::{Database, RemoteCredentials, RemoteDatabase, SqlStatement};
///
/// # async fn example() -> toast_link::Result<()> {
/// let db = RemoteDatabase::builder(RemoteCredentials::from_env()?).build()?;
/// let rows = db.query(&SqlStatement::new("SELECT COUNT(*) as count FROM users")).await?;
/// println!("{:?}", rows);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RemoteDatabase {
    base_url: String,
    http_client: reqwest::Client,
    credentials: RemoteCredentials,
}

impl RemoteDatabase {
    /// Create a builder for configuring the executor.
    pub fn builder(credentials: RemoteCredentials) -> RemoteDatabaseBuilder {
        RemoteDatabaseBuilder::new(credentials)
    }

    /// Shorthand for `builder(credentials).build()`.
    pub fn new(credentials: RemoteCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    fn query_url(&self) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}/query",
            self.base_url, self.credentials.account_id, self.credentials.database_id
        )
    }

    /// Execute a single statement against the query endpoint.
    pub async fn execute(&self, statement: &SqlStatement) -> Result<Vec<Row>> {
        let url = self.query_url();
        let payload = serde_json::to_string(statement)?;

        debug!("[D1_HTTP] POST {} payload={}", url, payload);
        debug!(
            "[D1_HTTP] token prefix: {}",
            self.credentials.token_preview()
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.credentials.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("[D1_HTTP] response status={} body={}", status, body);

        interpret_response(status, body)
    }
}

#[async_trait]
impl Database for RemoteDatabase {
    async fn query(&self, statement: &SqlStatement) -> Result<Vec<Row>> {
        self.execute(statement).await
    }
}

/// Turn a raw transport response into rows or an error.
///
/// Split out of [`RemoteDatabase::execute`] so envelope interpretation is
/// testable without a live endpoint.
fn interpret_response(status: u16, body: String) -> Result<Vec<Row>> {
    if !(200..300).contains(&status) {
        warn!("[D1_HTTP] transport error: status={} body={}", status, body);
        return Err(LinkError::Transport { status, body });
    }

    let envelope: QueryResponse = serde_json::from_str(&body)?;
    if !envelope.success {
        warn!("[D1_HTTP] remote error: {:?}", envelope.errors);
    }
    envelope.into_rows()
}

/// Builder for [`RemoteDatabase`] instances.
pub struct RemoteDatabaseBuilder {
    credentials: RemoteCredentials,
    base_url: String,
    danger_accept_invalid_certs: bool,
}

impl RemoteDatabaseBuilder {
    fn new(credentials: RemoteCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            danger_accept_invalid_certs: false,
        }
    }

    /// Override the provider base URL (test stubs, alternate gateways).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// Scoped to this client, never a process-wide setting. Only for
    /// corporate proxies that re-sign TLS traffic.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }

    /// Validate credentials and build the executor.
    pub fn build(self) -> Result<RemoteDatabase> {
        self.credentials.validate()?;

        let mut client_builder = reqwest::Client::builder();
        if self.danger_accept_invalid_certs {
            warn!("[D1_HTTP] TLS certificate verification is DISABLED");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }
        let http_client = client_builder
            .build()
            .map_err(|e| LinkError::Config(e.to_string()))?;

        Ok(RemoteDatabase {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http_client,
            credentials: self.credentials,
        })
    }
}
