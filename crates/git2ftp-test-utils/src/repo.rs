//! [`TestRepo`] builder for sync scenarios.

use std::path::Path;
use tempfile::TempDir;

use crate::git;

/// A temporary git repository with history helpers.
///
/// # Example
///
/// ```rust,no_run
/// use git2ftp_test_utils::repo::TestRepo;
///
/// let repo = TestRepo::new();
/// let base = repo.head();
/// repo.write("src/app.js", "console.log(1)");
/// let next = repo.commit("add app");
/// assert_ne!(base, next);
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Create a repository with one initial commit (`README.md`).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        git::real_git_repo_with_commit(temp_dir.path());
        Self { temp_dir }
    }

    /// Return the root path of the repository.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating directories as needed.
    pub fn write(&self, path: &str, content: &str) {
        git::write_file(self.root(), path, content);
    }

    /// Remove a tracked file from the working tree.
    pub fn remove(&self, path: &str) {
        git::remove_file(self.root(), path);
    }

    /// Commit all pending changes and return the new SHA.
    pub fn commit(&self, message: &str) -> String {
        git::commit_all(self.root(), message)
    }

    /// Full SHA of HEAD.
    pub fn head(&self) -> String {
        git::head_sha(self.root())
    }
}
