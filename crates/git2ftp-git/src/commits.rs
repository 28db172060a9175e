//! Commit lookup through libgit2.

use std::path::Path;

use git2::Repository;

use crate::{Error, Result};

/// Check that `rev` names a commit in the repository at `repo_root`.
///
/// Accepts anything `git rev-parse` accepts (full or short SHA, branch,
/// tag). Returns the full commit id the revision resolves to.
pub fn verify_commit(repo_root: &Path, rev: &str) -> Result<String> {
    let repo = Repository::open(repo_root)?;

    let not_found = || Error::CommitNotFound {
        rev: rev.to_string(),
        repo: repo_root.to_path_buf(),
    };

    let object = repo.revparse_single(rev).map_err(|_| not_found())?;
    let commit = object.peel_to_commit().map_err(|_| not_found())?;

    Ok(commit.id().to_string())
}
