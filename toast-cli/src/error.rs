//! Error types for toast-cli.
//!
//! Wraps the library error with the CLI-only failure modes (file access,
//! confirmation gates) and keeps messages terse enough to print directly.

use std::fmt;

use toast_link::LinkError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CliError {
    /// Error from the toast-link library
    Link(LinkError),

    /// Bad invocation: missing confirmation, invalid flag combination
    Config(String),

    /// File I/O error (migration files, state directories)
    File(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Link(e) => write!(f, "{}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::File(msg) => write!(f, "File error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LinkError> for CliError {
    fn from(err: LinkError) -> Self {
        CliError::Link(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::File(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::Config("confirmation required".into());
        assert_eq!(err.to_string(), "Configuration error: confirmation required");

        let err = CliError::Link(LinkError::Config("missing token".into()));
        assert_eq!(err.to_string(), "Configuration error: missing token");
    }
}
