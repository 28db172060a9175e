//! Remote transport for git2ftp
//!
//! A small trait over the FTP operations the sync engine needs, with a real
//! FTP implementation, a logging decorator, and a no-op stand-in.

pub mod error;
pub mod ftp;
pub mod logged;
pub mod noop;
pub mod transport;

pub use error::{BAD_FILE_NAME, Error, FILE_UNAVAILABLE, Operation, Result};
pub use ftp::{Credentials, DEFAULT_TIMEOUT, FtpSettings, FtpTransport};
pub use logged::LoggingTransport;
pub use noop::NoopTransport;
pub use transport::RemoteTransport;
