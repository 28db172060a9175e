//! Shared test utilities for the git2ftp workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures driven by the `git` CLI
//! - [`repo`]: [`repo::TestRepo`] builder for commit-by-commit scenarios
//! - [`transport`]: [`transport::MemoryTransport`], an in-memory FTP double

pub mod git;
pub mod repo;
pub mod transport;

pub use repo::TestRepo;
pub use transport::{MemoryTransport, RecordedOp};
