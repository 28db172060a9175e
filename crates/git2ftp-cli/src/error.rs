//! Error types for git2ftp-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from git2ftp-core
    #[error(transparent)]
    Core(#[from] git2ftp_core::Error),

    /// Error from git2ftp-git
    #[error(transparent)]
    Git(#[from] git2ftp_git::Error),

    /// Error from git2ftp-ftp
    #[error(transparent)]
    Transport(#[from] git2ftp_ftp::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse settings file {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// An error prefixed with what was being attempted
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CliError>,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Prefix this error with `context`.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
