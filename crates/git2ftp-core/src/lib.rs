//! Core synchronization layer for git2ftp
//!
//! Computes the files changed between two commits under a sync directory and
//! replays them onto a remote transport, tracking progress in a marker file
//! stored on the remote itself.

pub mod changeset;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reconcile;
pub mod report;
pub mod resume;

pub use changeset::{ChangeSetResolver, remote_path};
pub use config::{HEAD_SENTINEL, MARKER_FILE, SyncConfiguration, SyncConfigurationBuilder};
pub use error::{Error, Result};
pub use orchestrator::Orchestrator;
pub use reconcile::{ReconciliationEngine, create_dir_chain};
pub use report::{AppliedOperation, SyncReport};
pub use resume::ResumePointStore;
