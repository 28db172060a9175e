//! ReconciliationEngine implementation
//!
//! Replays change entries onto the remote one at a time, in the order the
//! diff emitted them. The first failure aborts the run; nothing already
//! applied is rolled back.
//!
//! Per entry:
//!
//! ```text
//! Pending -> Deleting -> Done | Failed
//! Pending -> Uploading -> Done
//!                      -> DirMissing -> CreatingDir -> Retrying -> Done | Failed
//! ```
//!
//! The only recovery is for an upload rejected with 553 (parent directory
//! missing): the directory chain is created and the upload retried once.

use std::fs::File;
use std::io::Seek;

use git2ftp_ftp::RemoteTransport;
use git2ftp_git::{ChangeAction, ChangeEntry};

use crate::changeset::remote_path;
use crate::config::SyncConfiguration;
use crate::report::AppliedOperation;
use crate::{Error, Result};

/// Applies change entries to a remote transport.
pub struct ReconciliationEngine<'a, T: RemoteTransport + ?Sized> {
    transport: &'a mut T,
    config: &'a SyncConfiguration,
}

impl<'a, T: RemoteTransport + ?Sized> ReconciliationEngine<'a, T> {
    pub fn new(transport: &'a mut T, config: &'a SyncConfiguration) -> Self {
        Self { transport, config }
    }

    /// Apply every entry in order, stopping at the first error.
    ///
    /// Returns the operations performed, including directories created on
    /// the way. A failure is wrapped in [`Error::Entry`] naming the entry.
    pub fn apply(&mut self, entries: &[ChangeEntry]) -> Result<Vec<AppliedOperation>> {
        let mut applied = Vec::with_capacity(entries.len());
        for entry in entries {
            self.apply_entry(entry, &mut applied)
                .map_err(|source| Error::Entry {
                    path: entry.path.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(applied)
    }

    fn apply_entry(
        &mut self,
        entry: &ChangeEntry,
        applied: &mut Vec<AppliedOperation>,
    ) -> Result<()> {
        let remote = remote_path(
            &entry.path,
            self.config.sync_subdirectory(),
            self.config.remote_root(),
        );
        tracing::debug!("file {} remote equivalent is {}", entry.path, remote);

        match &entry.action {
            ChangeAction::Deleted => {
                self.transport.delete(&remote)?;
                applied.push(AppliedOperation::Delete {
                    local: entry.path.clone(),
                    remote,
                });
            }
            ChangeAction::Added | ChangeAction::Modified => {
                self.upload(&entry.path, &remote, applied)?;
                applied.push(AppliedOperation::Store {
                    local: entry.path.clone(),
                    remote,
                });
            }
            ChangeAction::Unknown(letter) => {
                return Err(Error::UnknownAction {
                    action: letter.clone(),
                    path: entry.path.clone(),
                });
            }
        }

        Ok(())
    }

    fn upload(
        &mut self,
        local: &str,
        remote: &str,
        applied: &mut Vec<AppliedOperation>,
    ) -> Result<()> {
        let local_path = self.config.repository_root().join(local);
        let local_err = |source| Error::LocalFile {
            path: local_path.clone(),
            source,
        };
        let mut file = File::open(&local_path).map_err(local_err)?;

        let err = match self.transport.store(remote, &mut file) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        if !err.is_bad_file_name() {
            return Err(err.into());
        }
        let Some(dir) = parent_dir(remote) else {
            return Err(err.into());
        };

        tracing::info!(dir, "Remote directory missing, creating it");
        for created in create_dir_chain(&mut *self.transport, dir)? {
            applied.push(AppliedOperation::MakeDir { remote: created });
        }

        file.rewind().map_err(local_err)?;
        self.transport.store(remote, &mut file)?;
        Ok(())
    }
}

/// Create `dir` and any missing ancestors.
///
/// Tries `dir` first. Each level rejected with 550 is remembered and its
/// parent tried next, until one level is created. The remembered levels are
/// then created from the shallowest down, each exactly once and without
/// further fallback. Returns the directories created, in creation order.
///
/// # Errors
///
/// - [`Error::DirectoryUnavailable`] if the walk runs out of parents, or a
///   remembered level is still rejected with 550 on its second attempt
/// - [`Error::Transport`] for any other rejection
pub fn create_dir_chain<T: RemoteTransport + ?Sized>(
    transport: &mut T,
    dir: &str,
) -> Result<Vec<String>> {
    let dir = dir.trim_end_matches('/');
    let unavailable = |path: &str| Error::DirectoryUnavailable {
        path: path.to_string(),
    };

    let mut missing = Vec::new();
    let mut current = dir;
    loop {
        match transport.make_dir(current) {
            Ok(()) => break,
            Err(e) if e.is_file_unavailable() => {
                missing.push(current);
                current = parent_dir(current).ok_or_else(|| unavailable(dir))?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let mut created = vec![current.to_string()];
    for level in missing.into_iter().rev() {
        match transport.make_dir(level) {
            Ok(()) => created.push(level.to_string()),
            Err(e) if e.is_file_unavailable() => return Err(unavailable(level)),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(created)
}

/// Parent directory of a remote path, `None` at the top level.
fn parent_dir(path: &str) -> Option<&str> {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => Some(parent),
        _ => None,
    }
}
