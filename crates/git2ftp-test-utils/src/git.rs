//! Git repository fixtures.
//!
//! All history is produced with the real `git` CLI so that commits match what
//! `git diff --name-status` sees in production.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Initialises a real git repository using `git2` (no initial commit, no config).
///
/// Use for: tests that only need a valid repository to open, such as commit
/// lookups that are expected to fail.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Run `git <args>` in `path` and return its trimmed stdout.
///
/// # Panics
/// Panics if git cannot be started or exits unsuccessfully.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name` and `commit.gpgsign = false`
/// - Creates `README.md` and makes an initial commit
///
/// Returns the SHA of the initial commit.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) -> String {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    write_file(path, "README.md", "# Test");
    commit_all(path, "Initial commit")
}

/// Write `content` to `rel` under `root`, creating parent directories.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: failed to create {}: {e}", parent.display()));
    }
    fs::write(&full, content)
        .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", full.display()));
}

/// Remove the file `rel` under `root`.
///
/// # Panics
/// Panics if the file cannot be removed.
pub fn remove_file(root: &Path, rel: &str) {
    let full = root.join(rel);
    fs::remove_file(&full)
        .unwrap_or_else(|e| panic!("remove_file: failed to remove {}: {e}", full.display()));
}

/// Stage everything and commit. Returns the new HEAD SHA.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(path: &Path, message: &str) -> String {
    git(path, &["add", "-A"]);
    git(path, &["commit", "--allow-empty", "-m", message]);
    head_sha(path)
}

/// Full SHA of HEAD.
pub fn head_sha(path: &Path) -> String {
    git(path, &["rev-parse", "HEAD"])
}
