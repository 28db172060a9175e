//! Error types for git2ftp-ftp

use std::fmt;

/// Result type for git2ftp-ftp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reply code: requested action not taken, file unavailable.
pub const FILE_UNAVAILABLE: u32 = 550;

/// Reply code: requested action not taken, file name not allowed.
pub const BAD_FILE_NAME: u32 = 553;

/// A remote operation, named after the FTP command it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Connect,
    Login,
    Store,
    Retrieve,
    Delete,
    MakeDir,
    Quit,
}

impl Operation {
    /// The FTP command verb for this operation.
    pub fn command(&self) -> &'static str {
        match self {
            Operation::Connect => "CONNECT",
            Operation::Login => "USER",
            Operation::Store => "STOR",
            Operation::Retrieve => "RETR",
            Operation::Delete => "DELE",
            Operation::MakeDir => "MKD",
            Operation::Quit => "QUIT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Errors that can occur in remote transport operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a negative reply code
    #[error("{operation} {path}: {code} {message}")]
    Rejected {
        operation: Operation,
        path: String,
        code: u32,
        message: String,
    },

    /// The operation failed without a reply code (socket, protocol framing)
    #[error("{operation} {path}: {message}")]
    Failed {
        operation: Operation,
        path: String,
        message: String,
    },

    #[error("Cannot connect to {address}: {message}")]
    Connect { address: String, message: String },

    #[error("I/O error during {operation} {path}: {source}")]
    Io {
        operation: Operation,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn rejected(
        operation: Operation,
        path: impl Into<String>,
        code: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            operation,
            path: path.into(),
            code,
            message: message.into(),
        }
    }

    /// Reply code reported by the server, if the failure carried one.
    pub fn status(&self) -> Option<u32> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The operation that failed; `Connect` for dial failures.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Rejected { operation, .. }
            | Self::Failed { operation, .. }
            | Self::Io { operation, .. } => *operation,
            Self::Connect { .. } => Operation::Connect,
        }
    }

    /// 550: the file (or directory) does not exist or is not reachable.
    pub fn is_file_unavailable(&self) -> bool {
        self.status() == Some(FILE_UNAVAILABLE)
    }

    /// 553: the server refused the file name, typically because its parent
    /// directory does not exist.
    pub fn is_bad_file_name(&self) -> bool {
        self.status() == Some(BAD_FILE_NAME)
    }
}
