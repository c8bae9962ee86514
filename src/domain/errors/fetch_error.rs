//! Remote fetch error types.

use thiserror::Error;

/// Failure of a single remote search call. No partial results accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("rate limited by remote API")]
    RateLimited,

    #[error("remote API returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response from remote API: {message}")]
    InvalidResponse { message: String },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

impl FetchError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates HTTP status error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns whether repeating the same request may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => *status >= 500,
            Self::InvalidResponse { .. } | Self::Client { .. } => false,
        }
    }
}
