//! Error types for toast-link.
//!
//! One enum covers the whole client surface: configuration problems caught
//! before any I/O, transport-level HTTP failures, provider-reported errors
//! inside a 2xx envelope, and non-zero exits from the local provider CLI.

use thiserror::Error;

/// Result type for toast-link operations
pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors that can occur while talking to the toast database.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Missing or placeholder credentials, bad builder input. Always fatal,
    /// detected before any network or subprocess call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote endpoint answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced an HTTP status (DNS, TLS, connect failure).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx response whose envelope reports `success: false`.
    #[error("Remote database error: {}", errors.join("; "))]
    Remote { errors: Vec<String> },

    /// The provider CLI exited non-zero (local replica operations).
    #[error("Subprocess `{command}` failed ({}): {stderr}", status.map_or_else(|| "terminated".to_string(), |s| format!("exit code {s}")))]
    Subprocess {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A toast referenced a user that does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

impl LinkError {
    /// Whether this failure means the schema object is already present.
    ///
    /// Migration statements that fail this way are success-equivalent: the
    /// applier logs a warning and continues with the next statement.
    pub fn is_already_exists(&self) -> bool {
        self.to_string().contains("already exists")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_detection() {
        let err = LinkError::Remote {
            errors: vec!["table users already exists".to_string()],
        };
        assert!(err.is_already_exists());

        let err = LinkError::Remote {
            errors: vec!["near \"FROM\": syntax error".to_string()],
        };
        assert!(!err.is_already_exists());

        let err = LinkError::Subprocess {
            command: "wrangler d1 execute".to_string(),
            status: Some(1),
            stderr: "table toasts already exists".to_string(),
        };
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_transport_display_keeps_status_and_body() {
        let err = LinkError::Transport {
            status: 403,
            body: "{\"success\":false}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("{\"success\":false}"));
    }

    #[test]
    fn test_remote_display_joins_error_list() {
        let err = LinkError::Remote {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "Remote database error: first; second");
    }
}
