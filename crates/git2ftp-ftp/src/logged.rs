//! Operation log decorator

use std::io::Read;

use crate::error::{Operation, Result};
use crate::transport::RemoteTransport;

/// Wraps a transport and logs every operation and its outcome.
///
/// Each call emits `STOR web/a.js` before it runs and `STOR web/a.js: 200`
/// on success. Failures log the server reply code when there is one,
/// otherwise the error text.
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: RemoteTransport> LoggingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn observe<R>(
        &mut self,
        operation: Operation,
        path: &str,
        call: impl FnOnce(&mut T) -> Result<R>,
    ) -> Result<R> {
        let line = label(operation, path);
        tracing::info!("{}", line);
        match call(&mut self.inner) {
            Ok(value) => {
                tracing::info!("{}: 200", line);
                Ok(value)
            }
            Err(e) => {
                match e.status() {
                    Some(code) => tracing::warn!("{}: {}", line, code),
                    None => tracing::warn!("{}: {}", line, e),
                }
                Err(e)
            }
        }
    }
}

/// `STOR web/a.js`, or just `QUIT` for commands without a path.
fn label(operation: Operation, path: &str) -> String {
    if path.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} {path}")
    }
}

impl<T: RemoteTransport> RemoteTransport for LoggingTransport<T> {
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        self.observe(Operation::Store, path, |t| t.store(path, reader))
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        self.observe(Operation::Retrieve, path, |t| t.retrieve(path))
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        self.observe(Operation::Delete, path, |t| t.delete(path))
    }

    fn make_dir(&mut self, path: &str) -> Result<()> {
        self.observe(Operation::MakeDir, path, |t| t.make_dir(path))
    }

    fn quit(&mut self) -> Result<()> {
        self.observe(Operation::Quit, "", |t| t.quit())
    }
}
