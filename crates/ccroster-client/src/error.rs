//! Error types for the membership service client.

use thiserror::Error;

/// Errors raised while talking to the group membership service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("Failed {method} to {url} ({status}): {body}")]
    RemoteCallFailed {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// A paced call task could not be driven to completion.
    #[error("Scheduled call failed: {0}")]
    TaskFailed(String),

    /// At least one membership change was rejected.
    #[error("{failed} of {attempted} membership changes failed; first error: {source}")]
    ApplyFailed {
        failed: usize,
        attempted: usize,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteCallFailed { status, .. } => Some(*status),
            Self::ApplyFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the failure happened before any response arrived.
    #[must_use]
    pub fn is_network(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::ApplyFailed { source, .. } => source.is_network(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Network("Request timed out".to_string())
        } else if e.is_decode() {
            ClientError::Parse(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Parse(e.to_string())
    }
}

/// Result type alias using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16) -> ClientError {
        ClientError::RemoteCallFailed {
            method: "PATCH".to_string(),
            url: "https://dialpad.test/api/operator/1".to_string(),
            status,
            body: "nope".to_string(),
        }
    }

    #[test]
    fn test_remote_call_display() {
        let msg = remote(429).to_string();
        assert!(msg.contains("PATCH"));
        assert!(msg.contains("(429)"));
    }

    #[test]
    fn test_apply_failed_exposes_status() {
        let err = ClientError::ApplyFailed {
            failed: 1,
            attempted: 3,
            source: Box::new(remote(500)),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().starts_with("1 of 3"));
    }

    #[test]
    fn test_network_classification() {
        assert!(ClientError::Network("down".to_string()).is_network());
        assert!(!remote(404).is_network());
    }
}
