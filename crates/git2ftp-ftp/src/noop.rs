//! Transport that performs nothing

use std::io::Read;

use crate::Result;
use crate::transport::RemoteTransport;

/// Accepts every operation without touching any server.
///
/// Backs `--dry-run` and tests that only care about the decisions the engine
/// makes. `retrieve` always yields an empty file.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransport;

impl NoopTransport {
    pub fn new() -> Self {
        Self
    }
}

impl RemoteTransport for NoopTransport {
    fn store(&mut self, path: &str, _reader: &mut dyn Read) -> Result<()> {
        tracing::debug!(path, "dry-run: upload skipped");
        Ok(())
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        tracing::debug!(path, "dry-run: download skipped");
        Ok(Vec::new())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        tracing::debug!(path, "dry-run: delete skipped");
        Ok(())
    }

    fn make_dir(&mut self, path: &str) -> Result<()> {
        tracing::debug!(path, "dry-run: mkdir skipped");
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        Ok(())
    }
}
