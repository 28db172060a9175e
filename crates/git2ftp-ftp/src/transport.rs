//! Remote transport trait

use std::io::Read;

use crate::Result;

/// The four remote file operations the sync engine needs, plus session close.
///
/// Implementations: [`FtpTransport`](crate::FtpTransport) talks to a real
/// server, [`NoopTransport`](crate::NoopTransport) performs nothing, and
/// [`LoggingTransport`](crate::LoggingTransport) decorates either one with an
/// operation log.
///
/// All paths are remote paths with `/` separators, relative to the login
/// directory unless absolute.
pub trait RemoteTransport {
    /// Upload the full content of `reader` to `path`, overwriting any existing file.
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<()>;

    /// Download the full content of the file at `path`.
    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>>;

    /// Delete the file at `path`.
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Create a single directory. Parent directories are not created.
    fn make_dir(&mut self, path: &str) -> Result<()>;

    /// Close the session (log out).
    fn quit(&mut self) -> Result<()>;
}

impl<T: RemoteTransport + ?Sized> RemoteTransport for Box<T> {
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        (**self).store(path, reader)
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        (**self).retrieve(path)
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        (**self).delete(path)
    }

    fn make_dir(&mut self, path: &str) -> Result<()> {
        (**self).make_dir(path)
    }

    fn quit(&mut self) -> Result<()> {
        (**self).quit()
    }
}
