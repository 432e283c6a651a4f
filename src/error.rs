use thiserror::Error;

/// Error type for query construction and backend calls
#[derive(Error, Debug)]
pub enum EsError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Backend error: {reason}")]
    Backend { reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, EsError>;

impl EsError {
    /// Shorthand for a backend error carrying a reason phrase
    pub fn backend(reason: impl Into<String>) -> Self {
        EsError::Backend {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a transient failure that could be retried
    ///
    /// Backend errors are surfaced as-is; only failures to complete the
    /// exchange at all are worth another attempt by the caller.
    pub fn is_retriable(&self) -> bool {
        matches!(self, EsError::Transport(_))
    }

    /// Reason phrase for backend errors
    pub fn reason(&self) -> Option<&str> {
        match self {
            EsError::Backend { reason } => Some(reason),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EsError {
    fn from(err: reqwest::Error) -> Self {
        EsError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EsError::backend("Not Found");
        assert_eq!(err.to_string(), "Backend error: Not Found");

        let err = EsError::InvalidQuery("terms query requires at least one value".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid query: terms query requires at least one value"
        );
    }

    #[test]
    fn test_retriable_errors() {
        assert!(EsError::Transport("connection refused".to_string()).is_retriable());
        assert!(!EsError::backend("Internal Server Error").is_retriable());
        assert!(!EsError::InvalidQuery("empty".to_string()).is_retriable());
    }

    #[test]
    fn test_reason() {
        assert_eq!(EsError::backend("Conflict").reason(), Some("Conflict"));
        assert_eq!(EsError::Transport("x".to_string()).reason(), None);
    }
}
