//! Outcome of a sync run

use serde::{Deserialize, Serialize};

/// One remote operation that completed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedOperation {
    /// A local file uploaded to `remote`
    Store { local: String, remote: String },
    /// A remote file removed
    Delete { local: String, remote: String },
    /// A remote directory created to make room for an upload
    MakeDir { remote: String },
}

impl AppliedOperation {
    pub fn remote(&self) -> &str {
        match self {
            Self::Store { remote, .. } | Self::Delete { remote, .. } | Self::MakeDir { remote } => {
                remote
            }
        }
    }
}

/// Report from a completed sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Commit the diff started from
    pub from_commit: String,
    /// Commit now recorded in the marker file
    pub to_commit: String,
    /// Remote path of the marker file
    pub marker: String,
    /// Operations in the order they were applied
    pub operations: Vec<AppliedOperation>,
}

impl SyncReport {
    pub fn stored(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::Store { .. }))
    }

    pub fn deleted(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::Delete { .. }))
    }

    pub fn directories_created(&self) -> usize {
        self.count(|op| matches!(op, AppliedOperation::MakeDir { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn count(&self, predicate: impl Fn(&AppliedOperation) -> bool) -> usize {
        self.operations.iter().filter(|op| predicate(op)).count()
    }
}
