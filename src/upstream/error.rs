//! Failure modes of an upstream call.

use thiserror::Error;

/// Normalized failure of a single forwarded request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The mirror did not answer within the configured deadline.
    #[error("upstream timeout")]
    Timeout,

    /// The mirror answered with a status other than 200.
    #[error("upstream returned status {status}")]
    Status { status: u16 },

    /// Connection, TLS, or body decoding failed.
    #[error("upstream unavailable: {message}")]
    Unavailable { message: String },
}

impl UpstreamError {
    /// Whether a different mirror might succeed where this one failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, UpstreamError::Timeout | UpstreamError::Unavailable { .. })
    }

    /// Short label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "timeout",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Unavailable { .. } => "unavailable",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Unavailable {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(UpstreamError::Timeout.is_transport());
        assert!(UpstreamError::Unavailable { message: "refused".into() }.is_transport());
        assert!(!UpstreamError::Status { status: 503 }.is_transport());
    }
}
