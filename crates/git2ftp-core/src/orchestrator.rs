//! Orchestrator: one complete sync run
//!
//! resume point → change set → reconciliation → new resume point.

use git2ftp_ftp::RemoteTransport;
use git2ftp_git::DiffOracle;

use crate::changeset::ChangeSetResolver;
use crate::config::SyncConfiguration;
use crate::reconcile::ReconciliationEngine;
use crate::report::SyncReport;
use crate::resume::ResumePointStore;
use crate::{Error, Result};

/// Drives a sync run for one configuration.
pub struct Orchestrator<'a> {
    config: &'a SyncConfiguration,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a SyncConfiguration) -> Self {
        Self { config }
    }

    /// Synchronize, leaving the session open.
    ///
    /// The resume point is written only after every entry has been applied,
    /// so a failed run can be repeated with the same starting commit.
    ///
    /// # Errors
    ///
    /// Every error is fatal; see [`Error`] for the taxonomy.
    pub fn sync<O, T>(&self, oracle: &O, transport: &mut T) -> Result<SyncReport>
    where
        O: DiffOracle + ?Sized,
        T: RemoteTransport + ?Sized,
    {
        let config = self.config;
        let store = ResumePointStore::new(config.remote_root());

        let from_commit = match config.from_commit() {
            Some(commit) => commit.to_string(),
            None => store.read(transport)?,
        };
        tracing::info!(from = %from_commit, to = %config.to_commit(), "Synchronizing");

        let entries = ChangeSetResolver::new(oracle).resolve(
            config.repository_root(),
            &from_commit,
            config.to_commit(),
            config.sync_subdirectory(),
        )?;
        tracing::info!(count = entries.len(), "Changed files to apply");

        let operations = ReconciliationEngine::new(transport, config).apply(&entries)?;

        store.write(transport, config.to_commit())?;

        Ok(SyncReport {
            from_commit,
            to_commit: config.to_commit().to_string(),
            marker: store.marker_path().to_string(),
            operations,
        })
    }

    /// Synchronize, then close the session whatever the outcome.
    ///
    /// A close failure is reported only when the sync itself succeeded;
    /// otherwise it is logged and the sync error wins.
    pub fn run<O, T>(&self, oracle: &O, transport: &mut T) -> Result<SyncReport>
    where
        O: DiffOracle + ?Sized,
        T: RemoteTransport + ?Sized,
    {
        let outcome = self.sync(oracle, transport);
        let closed = transport.quit();

        match (outcome, closed) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(e)) => Err(Error::Logout(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(quit_err)) => {
                tracing::warn!(error = %quit_err, "Logout failed after an earlier error");
                Err(e)
            }
        }
    }
}
