//! Command implementations for git2ftp-cli

pub mod sync;

pub use sync::run_sync;
