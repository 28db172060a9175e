//! Git abstraction for git2ftp
//!
//! Produces the list of files changed between two commits.

pub mod commits;
pub mod diff;
pub mod error;
pub mod status;

pub use commits::verify_commit;
pub use diff::{DiffOracle, GitCli};
pub use error::{Error, Result};
pub use status::{ChangeAction, ChangeEntry, parse_name_status_line};
