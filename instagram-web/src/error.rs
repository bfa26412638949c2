//! Error types for the Instagram web client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the Instagram web API.
///
/// Every variant is returned before the session is touched: a failed call
/// never updates the cookie jar or the CSRF token.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// The HTTP transport could not be built, or the unauthenticated
    /// handshake or login request failed for a reason other than rejected
    /// credentials.
    #[error("client initialization failed: {context}")]
    Initialization {
        /// Which construction step failed.
        context: String,
        /// The underlying failure, when there is one.
        #[source]
        source: Option<Box<InstagramError>>,
    },

    /// The login endpoint did not report an authenticated session, or an
    /// endpoint needing the current user's id found no `ds_user_id` cookie.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The server answered with a status other than `200 OK`.
    ///
    /// The response body is discarded. An expired session usually shows up
    /// here as a redirect to the login page or a `403`.
    #[error("request to {url} failed with HTTP {status}")]
    Request {
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Target URL without the query string.
        url: String,
    },

    /// The response body did not match the endpoint's JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl InstagramError {
    pub(crate) fn initialization(context: impl Into<String>) -> Self {
        Self::Initialization {
            context: context.into(),
            source: None,
        }
    }

    pub(crate) fn initialization_caused_by(context: impl Into<String>, source: Self) -> Self {
        Self::Initialization {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience alias for `Result<T, InstagramError>`.
pub type Result<T> = std::result::Result<T, InstagramError>;
