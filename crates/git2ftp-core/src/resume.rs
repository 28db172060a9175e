//! Resume point marker file on the remote.
//!
//! The marker holds the last successfully synchronized commit as its entire
//! content. It is read once at the start of a run and overwritten once after
//! every change has been applied, never in between.

use git2ftp_ftp::RemoteTransport;

use crate::config::marker_path;
use crate::{Error, Result};

/// Reads and writes the marker file below one remote root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePointStore {
    marker: String,
}

impl ResumePointStore {
    /// `remote_root` must already be normalized (empty or ending with `/`).
    pub fn new(remote_root: &str) -> Self {
        Self {
            marker: marker_path(remote_root),
        }
    }

    pub fn marker_path(&self) -> &str {
        &self.marker
    }

    /// Read the last synchronized commit.
    ///
    /// # Errors
    ///
    /// - [`Error::ResumeNotFound`] if the marker does not exist (550) or is empty
    /// - [`Error::ResumeRead`] for any other transport failure
    pub fn read<T: RemoteTransport + ?Sized>(&self, transport: &mut T) -> Result<String> {
        let content = match transport.retrieve(&self.marker) {
            Ok(content) => content,
            Err(e) if e.is_file_unavailable() => {
                return Err(Error::ResumeNotFound {
                    marker: self.marker.clone(),
                });
            }
            Err(source) => {
                return Err(Error::ResumeRead {
                    marker: self.marker.clone(),
                    source,
                });
            }
        };

        let commit = String::from_utf8_lossy(&content).trim().to_string();
        if commit.is_empty() {
            return Err(Error::ResumeNotFound {
                marker: self.marker.clone(),
            });
        }

        tracing::info!(marker = %self.marker, commit = %commit, "Resuming from remote marker");
        Ok(commit)
    }

    /// Overwrite the marker with `commit`.
    pub fn write<T: RemoteTransport + ?Sized>(&self, transport: &mut T, commit: &str) -> Result<()> {
        transport
            .store(&self.marker, &mut commit.as_bytes())
            .map_err(|source| Error::ResumeWrite {
                marker: self.marker.clone(),
                source,
            })
    }
}
