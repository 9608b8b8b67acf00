//! Gateway error types.
//!
//! Every gateway operation distinguishes "confirmed absent" (an `Ok` result
//! holding `None` or an empty listing) from "could not determine" (an `Err`),
//! so callers can choose between a permanent 404 and a retry.

use thiserror::Error;

/// Result type alias using `GatewayError`.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors produced by the content gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The caller-supplied input was unusable before any request was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The gateway could not be constructed from the given configuration.
    #[error("gateway configuration error: {0}")]
    Config(String),

    /// Network-level failure reaching the CMS (DNS, connect, timeout, TLS).
    #[error("CMS transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The CMS answered with a non-success HTTP status.
    #[error("CMS returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The CMS executed the request but reported GraphQL-level errors.
    #[error("CMS GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The response body did not match the expected shape.
    #[error("failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether retrying the same request later could plausibly succeed.
    ///
    /// Transport failures and server-side HTTP errors are transient; invalid
    /// requests, GraphQL query errors and decode failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
