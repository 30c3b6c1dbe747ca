//! Error types for Repolish

use thiserror::Error;

/// Result type alias for Repolish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rewriting a review
#[derive(Error, Debug)]
pub enum Error {
    /// Requested style label is not in the catalog
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Could not reach the completion provider
    #[error("Provider connection error: {0}")]
    Connection(String),

    /// Provider rejected the request due to rate limiting (HTTP 429)
    #[error("Provider rate limit exceeded: {0}")]
    RateLimited(String),

    /// Provider-side API failure (5xx and other server faults)
    #[error("Provider API error: {0}")]
    Api(String),

    /// Credential was rejected (HTTP 401/403)
    #[error("Provider authentication error: {0}")]
    Auth(String),

    /// Provider rejected the request itself (4xx other than 429)
    #[error("Provider rejected the request: {0}")]
    BadRequest(String),

    /// Response body did not match the expected completion shape
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider returned a completion with no content
    #[error("Provider returned an empty completion")]
    EmptyResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this failure class is safe to retry.
    ///
    /// Connection faults, rate limiting, and generic API faults are
    /// transient; everything else surfaces immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::RateLimited(_) | Error::Api(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classes() {
        assert!(Error::Connection("refused".into()).is_transient());
        assert!(Error::RateLimited("429".into()).is_transient());
        assert!(Error::Api("500".into()).is_transient());
    }

    #[test]
    fn test_terminal_classes() {
        assert!(!Error::UnknownStyle("Loud".into()).is_transient());
        assert!(!Error::Auth("bad key".into()).is_transient());
        assert!(!Error::BadRequest("bad model".into()).is_transient());
        assert!(!Error::InvalidResponse("no choices".into()).is_transient());
        assert!(!Error::EmptyResponse.is_transient());
        assert!(!Error::Config("missing".into()).is_transient());
    }
}
