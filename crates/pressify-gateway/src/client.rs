//! Low-level GraphQL transport.
//!
//! [`GraphqlClient`] owns the HTTP client, the endpoint URL and the static
//! request headers (User-Agent and, when credentials are configured, a Basic
//! Authorization header). One `execute` call issues exactly one request; no
//! retry, no backoff.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pressify_core::CmsConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::error::{GatewayError, Result};

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,
    errors: Option<Vec<ErrorEntry>>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// HTTP transport for the CMS GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl GraphqlClient {
    /// Build a client from the CMS configuration.
    pub fn new(cms: &CmsConfig) -> Result<Self> {
        let endpoint = Url::parse(&cms.graphql_url).map_err(|e| {
            GatewayError::config(format!("invalid GraphQL URL {}: {e}", cms.graphql_url))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GatewayError::config(
                "GraphQL URL must use the http or https scheme",
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&cms.user_agent)
                .map_err(|e| GatewayError::config(format!("invalid user agent: {e}")))?,
        );

        if let (Some(user), Some(password)) = (&cms.basic_auth_user, &cms.basic_auth_password) {
            let token = BASE64.encode(format!("{user}:{password}"));
            let mut value = HeaderValue::from_str(&format!("Basic {token}"))
                .map_err(|e| GatewayError::config(format!("invalid credentials: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(cms.timeout_secs))
            .default_headers(headers);

        if cms.allow_insecure_tls {
            warn!("TLS certificate verification disabled for CMS requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| GatewayError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { endpoint, client })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Execute one GraphQL request and return the `data` value.
    ///
    /// Transport failures, non-success HTTP statuses and GraphQL-level
    /// errors all surface as distinct [`GatewayError`] variants.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        debug!(endpoint = %self.endpoint, "executing GraphQL request");

        let body = json!({ "query": query, "variables": variables });
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status { status });
        }

        let envelope: Envelope = response.json().await?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            return Err(GatewayError::GraphQl {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        envelope.data.ok_or_else(|| GatewayError::GraphQl {
            messages: vec!["response carried neither data nor errors".to_string()],
        })
    }
}
