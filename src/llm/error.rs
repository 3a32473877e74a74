//! Error types for oracle calls.

use std::time::Duration;

/// Broad classification of an oracle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Connection, DNS, or timeout failure before a response arrived.
    Network,
    /// 429 from the provider.
    RateLimited,
    /// 5xx from the provider.
    Server,
    /// Other 4xx from the provider (bad key, malformed request).
    Client,
    /// The response body could not be interpreted.
    Parse,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::RateLimited => write!(f, "rate limit"),
            Self::Server => write!(f, "server"),
            Self::Client => write!(f, "client"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// Classify an HTTP status code from the provider.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        500..=599 => LlmErrorKind::Server,
        400..=499 => LlmErrorKind::Client,
        _ => LlmErrorKind::Server,
    }
}

/// A failed oracle call.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status, when the provider answered at all.
    pub status_code: Option<u16>,
    /// Provider-suggested backoff, when present. Informational only: the
    /// pipeline never retries within a request.
    pub retry_after: Option<Duration>,
}

impl LlmError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Network,
            message: message.into(),
            status_code: None,
            retry_after: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Parse,
            message: message.into(),
            status_code: None,
            retry_after: None,
        }
    }

    /// Build an error from an HTTP response status and body.
    pub fn from_status(status: u16, body: &str, retry_after: Option<Duration>) -> Self {
        Self {
            kind: classify_http_status(status),
            message: body.to_string(),
            status_code: Some(status),
            retry_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_http_status() {
        assert_eq!(classify_http_status(429), LlmErrorKind::RateLimited);
        assert_eq!(classify_http_status(500), LlmErrorKind::Server);
        assert_eq!(classify_http_status(503), LlmErrorKind::Server);
        assert_eq!(classify_http_status(400), LlmErrorKind::Client);
        assert_eq!(classify_http_status(401), LlmErrorKind::Client);
        assert_eq!(classify_http_status(302), LlmErrorKind::Server);
    }

    #[test]
    fn test_from_status_carries_metadata() {
        let err = LlmError::from_status(429, "quota exceeded", Some(Duration::from_secs(30)));
        assert_eq!(err.kind, LlmErrorKind::RateLimited);
        assert_eq!(err.status_code, Some(429));
        assert_eq!(err.retry_after, Some(Duration::from_secs(30)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
