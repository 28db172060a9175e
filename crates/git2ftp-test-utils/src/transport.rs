//! In-memory FTP server double.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use git2ftp_ftp::{BAD_FILE_NAME, Error, FILE_UNAVAILABLE, Operation, RemoteTransport, Result};

/// An operation as the server saw it, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    Store(String),
    Retrieve(String),
    Delete(String),
    MakeDir(String),
    Quit,
}

struct ScriptedFailure {
    operation: Operation,
    path: String,
    code: u32,
    /// `None` fails forever
    remaining: Option<usize>,
}

/// A remote file tree held in memory that answers like a typical FTP server:
///
/// - `STOR` into a missing directory is rejected with 553
/// - `MKD` of an existing entry or under a missing parent is rejected with 550
/// - `RETR` and `DELE` of a missing file are rejected with 550
///
/// The root directory (`""`) always exists. Every attempted operation is
/// recorded in order, and failures can be scripted per operation and path.
#[derive(Default)]
pub struct MemoryTransport {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    ops: Vec<RecordedOp>,
    failures: Vec<ScriptedFailure>,
    quit: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `path` and all of its ancestors.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert_dir_chain(path);
        self
    }

    /// Create a file (and its ancestor directories).
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        if let Some(parent) = parent_of(path) {
            self.insert_dir_chain(parent);
        }
        self.files.insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    /// Reject the next `times` calls of `operation` on `path` with `code`.
    pub fn fail_times(mut self, operation: Operation, path: &str, code: u32, times: usize) -> Self {
        self.failures.push(ScriptedFailure {
            operation,
            path: path.to_string(),
            code,
            remaining: Some(times),
        });
        self
    }

    /// Reject every call of `operation` on `path` with `code`.
    pub fn fail_always(mut self, operation: Operation, path: &str, code: u32) -> Self {
        self.failures.push(ScriptedFailure {
            operation,
            path: path.to_string(),
            code,
            remaining: None,
        });
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn file_string(&self, path: &str) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn has_dir(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path.trim_end_matches('/'))
    }

    /// Sorted paths of every file currently stored.
    pub fn file_paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    pub fn quit_called(&self) -> bool {
        self.quit
    }

    fn insert_dir_chain(&mut self, path: &str) {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return;
        }
        if let Some(parent) = parent_of(path) {
            self.insert_dir_chain(parent);
        }
        self.dirs.insert(path.to_string());
    }

    fn scripted(&mut self, operation: Operation, path: &str) -> Result<()> {
        let hit = self
            .failures
            .iter_mut()
            .find(|f| f.operation == operation && f.path == path && f.remaining != Some(0));

        match hit {
            Some(failure) => {
                if let Some(remaining) = failure.remaining.as_mut() {
                    *remaining -= 1;
                }
                Err(Error::rejected(operation, path, failure.code, "scripted failure"))
            }
            None => Ok(()),
        }
    }
}

impl RemoteTransport for MemoryTransport {
    fn store(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        self.ops.push(RecordedOp::Store(path.to_string()));
        self.scripted(Operation::Store, path)?;

        if !self.has_dir(parent_of(path).unwrap_or("")) {
            return Err(Error::rejected(
                Operation::Store,
                path,
                BAD_FILE_NAME,
                "Could not create file.",
            ));
        }

        let mut content = Vec::new();
        reader.read_to_end(&mut content).map_err(|source| Error::Io {
            operation: Operation::Store,
            path: path.to_string(),
            source,
        })?;
        self.files.insert(path.to_string(), content);
        Ok(())
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        self.ops.push(RecordedOp::Retrieve(path.to_string()));
        self.scripted(Operation::Retrieve, path)?;

        self.files.get(path).cloned().ok_or_else(|| {
            Error::rejected(Operation::Retrieve, path, FILE_UNAVAILABLE, "Failed to open file.")
        })
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        self.ops.push(RecordedOp::Delete(path.to_string()));
        self.scripted(Operation::Delete, path)?;

        self.files.remove(path).map(|_| ()).ok_or_else(|| {
            Error::rejected(Operation::Delete, path, FILE_UNAVAILABLE, "Delete operation failed.")
        })
    }

    fn make_dir(&mut self, path: &str) -> Result<()> {
        self.ops.push(RecordedOp::MakeDir(path.to_string()));
        self.scripted(Operation::MakeDir, path)?;

        let exists = self.has_dir(path) || self.files.contains_key(path);
        let parent_missing = !self.has_dir(parent_of(path).unwrap_or(""));
        if exists || parent_missing {
            return Err(Error::rejected(
                Operation::MakeDir,
                path,
                FILE_UNAVAILABLE,
                "Create directory operation failed.",
            ));
        }

        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.ops.push(RecordedOp::Quit);
        self.scripted(Operation::Quit, "")?;
        self.quit = true;
        Ok(())
    }
}

fn parent_of(path: &str) -> Option<&str> {
    path.trim_end_matches('/').rsplit_once('/').map(|(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_requires_parent_dir() {
        let mut remote = MemoryTransport::new();
        let err = remote.store("web/a.js", &mut &b"x"[..]).unwrap_err();
        assert!(err.is_bad_file_name());

        let mut remote = MemoryTransport::new().with_dir("web");
        remote.store("web/a.js", &mut &b"x"[..]).unwrap();
        assert_eq!(remote.file("web/a.js"), Some(&b"x"[..]));
    }

    #[test]
    fn test_make_dir_requires_parent_and_absence() {
        let mut remote = MemoryTransport::new().with_dir("web");
        assert!(remote.make_dir("web/a/b").unwrap_err().is_file_unavailable());
        assert!(remote.make_dir("web").unwrap_err().is_file_unavailable());
        remote.make_dir("web/a").unwrap();
        assert!(remote.has_dir("web/a"));
    }

    #[test]
    fn test_scripted_failures_run_out() {
        let mut remote = MemoryTransport::new().fail_times(Operation::Store, "a.txt", 451, 1);
        assert_eq!(remote.store("a.txt", &mut &b""[..]).unwrap_err().status(), Some(451));
        remote.store("a.txt", &mut &b""[..]).unwrap();
        assert_eq!(
            remote.ops(),
            &[
                RecordedOp::Store("a.txt".into()),
                RecordedOp::Store("a.txt".into())
            ]
        );
    }

    #[test]
    fn test_root_level_files_need_no_dir() {
        let mut remote = MemoryTransport::new();
        remote.store(".git2ftp", &mut &b"abc"[..]).unwrap();
        assert_eq!(remote.file_string(".git2ftp").as_deref(), Some("abc"));
    }
}
