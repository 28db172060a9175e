//! FTP transport backed by `suppaftp`

use std::io::Read;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use suppaftp::{FtpError, FtpStream};

use crate::error::{Error, Operation, Result};
use crate::transport::RemoteTransport;

/// Dial timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Login credentials. User and password always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Connection settings for an FTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpSettings {
    /// Server address of the form `ftp.example.org:21`
    pub address: String,

    /// Credentials, or `None` to skip the login step
    pub credentials: Option<Credentials>,

    /// Timeout applied when dialing
    pub timeout: Duration,
}

impl FtpSettings {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A live FTP session.
pub struct FtpTransport {
    stream: FtpStream,
}

impl FtpTransport {
    /// Dial the server and log in when credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] if the address does not resolve or the dial
    /// fails, and a `USER` error if the server refuses the credentials.
    pub fn connect(settings: &FtpSettings) -> Result<Self> {
        let addr = resolve(&settings.address)?;
        tracing::debug!(address = %settings.address, resolved = %addr, "Dialing FTP server");

        let stream = FtpStream::connect_timeout(addr, settings.timeout).map_err(|e| {
            Error::Connect {
                address: settings.address.clone(),
                message: e.to_string(),
            }
        })?;

        let mut transport = Self { stream };
        if let Some(credentials) = &settings.credentials {
            transport
                .stream
                .login(credentials.user.as_str(), credentials.password.as_str())
                .map_err(|e| convert(Operation::Login, &credentials.user, e))?;
            tracing::debug!(user = %credentials.user, "Logged in");
        }

        Ok(transport)
    }
}

impl RemoteTransport for FtpTransport {
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        let mut reader = reader;
        self.stream
            .put_file(path, &mut reader)
            .map(|_| ())
            .map_err(|e| convert(Operation::Store, path, e))
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        self.stream
            .retr_as_buffer(path)
            .map(|cursor| cursor.into_inner())
            .map_err(|e| convert(Operation::Retrieve, path, e))
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        self.stream
            .rm(path)
            .map_err(|e| convert(Operation::Delete, path, e))
    }

    fn make_dir(&mut self, path: &str) -> Result<()> {
        self.stream
            .mkdir(path)
            .map_err(|e| convert(Operation::MakeDir, path, e))
    }

    fn quit(&mut self) -> Result<()> {
        self.stream
            .quit()
            .map_err(|e| convert(Operation::Quit, "", e))
    }
}

fn resolve(address: &str) -> Result<SocketAddr> {
    let connect_err = |message: String| Error::Connect {
        address: address.to_string(),
        message,
    };

    address
        .to_socket_addrs()
        .map_err(|e| connect_err(e.to_string()))?
        .next()
        .ok_or_else(|| connect_err("address did not resolve".to_string()))
}

/// Keep the reply code when the server produced one, so callers can react to
/// 550/553 without parsing messages.
fn convert(operation: Operation, path: &str, err: FtpError) -> Error {
    match err {
        FtpError::UnexpectedResponse(response) => Error::Rejected {
            operation,
            path: path.to_string(),
            code: response.status.code(),
            message: String::from_utf8_lossy(&response.body).trim().to_string(),
        },
        FtpError::ConnectionError(source) => Error::Io {
            operation,
            path: path.to_string(),
            source,
        },
        other => Error::Failed {
            operation,
            path: path.to_string(),
            message: other.to_string(),
        },
    }
}
