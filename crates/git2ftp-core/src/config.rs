//! Sync configuration
//!
//! Built once, validated and normalized at construction, then shared by
//! reference with every component. Nothing mutates it afterwards.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Symbolic revision that is refused as a target commit.
pub const HEAD_SENTINEL: &str = "HEAD";

/// Name of the resume point marker file inside the remote root.
pub const MARKER_FILE: &str = ".git2ftp";

/// What to synchronize, from where, to where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfiguration {
    repository_root: PathBuf,
    remote_root: String,
    sync_subdirectory: String,
    from_commit: Option<String>,
    to_commit: String,
}

impl SyncConfiguration {
    /// Start building a configuration from its required values.
    pub fn builder(
        repository_root: impl Into<PathBuf>,
        remote_root: impl Into<String>,
        to_commit: impl Into<String>,
    ) -> SyncConfigurationBuilder {
        SyncConfigurationBuilder {
            repository_root: repository_root.into(),
            remote_root: remote_root.into(),
            to_commit: to_commit.into(),
            sync_subdirectory: String::new(),
            from_commit: None,
        }
    }

    /// Local repository root; diff paths are relative to it.
    pub fn repository_root(&self) -> &Path {
        &self.repository_root
    }

    /// Remote directory receiving the files. Empty, or ends with `/`.
    pub fn remote_root(&self) -> &str {
        &self.remote_root
    }

    /// Repository subdirectory to synchronize. Empty, or ends with `/`.
    pub fn sync_subdirectory(&self) -> &str {
        &self.sync_subdirectory
    }

    /// Explicit starting commit. When `None` the remote resume point is used.
    pub fn from_commit(&self) -> Option<&str> {
        self.from_commit.as_deref()
    }

    pub fn to_commit(&self) -> &str {
        &self.to_commit
    }

    /// Remote path of the resume point marker file.
    pub fn marker_path(&self) -> String {
        marker_path(&self.remote_root)
    }
}

/// Builder for [`SyncConfiguration`].
#[derive(Debug, Clone)]
pub struct SyncConfigurationBuilder {
    repository_root: PathBuf,
    remote_root: String,
    to_commit: String,
    sync_subdirectory: String,
    from_commit: Option<String>,
}

impl SyncConfigurationBuilder {
    /// Restrict the sync to paths starting with `dir` (plain string prefix).
    pub fn sync_subdirectory(mut self, dir: impl Into<String>) -> Self {
        self.sync_subdirectory = dir.into();
        self
    }

    /// Start from `commit` instead of the remote resume point.
    /// An empty string counts as not given.
    pub fn from_commit(mut self, commit: Option<String>) -> Self {
        self.from_commit = commit;
        self
    }

    /// Validate and normalize.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the target commit is empty or `HEAD`.
    pub fn build(self) -> Result<SyncConfiguration> {
        let to_commit = self.to_commit.trim().to_string();
        if to_commit.is_empty() {
            return Err(Error::config("The target commit must not be empty"));
        }
        if to_commit == HEAD_SENTINEL {
            return Err(Error::config(
                "Cannot use HEAD as the target commit; give an explicit commit SHA",
            ));
        }

        let from_commit = self
            .from_commit
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(SyncConfiguration {
            repository_root: self.repository_root,
            remote_root: with_trailing_slash(self.remote_root),
            sync_subdirectory: with_trailing_slash(self.sync_subdirectory),
            from_commit,
            to_commit,
        })
    }
}

/// Remote path of the marker file for an already normalized remote root.
pub fn marker_path(remote_root: &str) -> String {
    format!("{remote_root}{MARKER_FILE}")
}

fn with_trailing_slash(mut dir: String) -> String {
    if !dir.is_empty() && !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}
