//! Error taxonomy for search tool invocations.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the search engine.
///
/// Every failure a tool invocation can hit maps onto exactly one of these
/// variants; the protocol layer only ever sees the serialized [`ErrorBody`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed, out-of-range, or contradictory input. Never retried.
    #[error("invalid `{field}`: {message}")]
    Validation {
        /// Name of the offending argument
        field: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// Tool name not recognized. Never retried.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The unrecognized tool name
        name: String,
    },

    /// Timeout, connection failure, or 5xx from the remote API.
    #[error("transient network error: {message}")]
    Transient {
        /// Underlying failure description
        message: String,
    },

    /// Non-throttling 4xx from the remote API. Never retried.
    #[error("remote API rejected the request ({status}): {detail}")]
    RemoteRejection {
        /// HTTP status code
        status: u16,
        /// Remote-provided detail, when available
        detail: String,
    },

    /// The remote API signalled throttling despite local gating.
    #[error("remote rate limit exceeded")]
    RateLimited {
        /// Server-suggested wait before retrying
        retry_after: Option<Duration>,
    },
}

impl SearchError {
    /// Shorthand for a validation failure naming the offending field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Stable machine-readable kind string for the wire error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::UnknownTool { .. } => "unknown_tool",
            Self::Transient { .. } => "transient_network_error",
            Self::RemoteRejection { .. } => "remote_rejection",
            Self::RateLimited { .. } => "rate_limit_exceeded",
        }
    }

    /// Whether a bounded retry may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::RateLimited { .. })
    }

    /// Server-suggested retry delay, if the remote provided one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Serialize into the structured error returned to the caller.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error_kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transient {
            message: err.to_string(),
        }
    }
}

/// Structured error shape handed back to the protocol layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_names_field() {
        let err = SearchError::validation("champ", "not valid for this domain");
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("champ"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(
            SearchError::Transient {
                message: "timeout".into()
            }
            .is_retryable()
        );
        assert!(SearchError::RateLimited { retry_after: None }.is_retryable());
        assert!(
            !SearchError::RemoteRejection {
                status: 422,
                detail: "bad payload".into()
            }
            .is_retryable()
        );
        assert!(
            !SearchError::UnknownTool {
                name: "rechercher_autre".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = SearchError::UnknownTool {
            name: "nope".into(),
        }
        .to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errorKind"], "unknown_tool");
        assert!(json["message"].as_str().unwrap().contains("nope"));
    }

    #[test]
    fn test_retry_after_passthrough() {
        let err = SearchError::RateLimited {
            retry_after: Some(Duration::from_secs(2)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(
            SearchError::Transient {
                message: "x".into()
            }
            .retry_after(),
            None
        );
    }
}
