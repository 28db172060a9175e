//! Error types for git2ftp-git

use std::path::PathBuf;

/// Result type for git2ftp-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in git2ftp-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Cannot start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The diff process exited unsuccessfully; `stderr` is its diagnostic output
    #[error("{status}: {stderr}")]
    DiffFailed { status: String, stderr: String },

    #[error("Revision '{rev}' does not name a commit in {repo}")]
    CommitNotFound { rev: String, repo: PathBuf },
}
