//! Error types for git2ftp-core

use std::path::PathBuf;

/// Result type for git2ftp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or conflicting configuration
    #[error("{message}")]
    Config { message: String },

    /// The marker file is absent (or empty) and no starting commit was given
    #[error("Resume point {marker} does not exist on the remote; a starting commit must be given")]
    ResumeNotFound { marker: String },

    #[error("Cannot retrieve resume point {marker}: {source}")]
    ResumeRead {
        marker: String,
        #[source]
        source: git2ftp_ftp::Error,
    },

    #[error("Could not store resume point {marker}: {source}")]
    ResumeWrite {
        marker: String,
        #[source]
        source: git2ftp_ftp::Error,
    },

    /// The diff oracle failed
    #[error(transparent)]
    Diff(#[from] git2ftp_git::Error),

    /// A remote operation failed
    #[error(transparent)]
    Transport(#[from] git2ftp_ftp::Error),

    /// A remote directory chain could not be created
    #[error("Cannot create remote directory {path}")]
    DirectoryUnavailable { path: String },

    /// The diff reported a status other than added, modified or deleted
    #[error("Unknown action '{action}' for {path}")]
    UnknownAction { action: String, path: String },

    #[error("Cannot read local file: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A change entry failed; `path` is its repository-relative path
    #[error("{source}")]
    Entry {
        path: String,
        #[source]
        source: Box<Error>,
    },

    /// Closing the remote session failed after an otherwise successful run
    #[error("Cannot log out from remote: {0}")]
    Logout(#[source] git2ftp_ftp::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The error behind an [`Error::Entry`] wrapper, or `self`.
    pub fn entry_cause(&self) -> &Error {
        match self {
            Self::Entry { source, .. } => source.entry_cause(),
            other => other,
        }
    }
}
