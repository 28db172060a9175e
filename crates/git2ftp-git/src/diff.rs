//! Diff oracle: the source of name-status records between two commits

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Produces raw `git diff --name-status` output lines between two commits.
///
/// Lines are returned in emission order and not interpreted; parsing and
/// filtering belong to the caller.
pub trait DiffOracle {
    fn name_status(&self, repo_root: &Path, from: &str, to: &str) -> Result<Vec<String>>;
}

/// Runs the `git` binary as a subprocess.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DiffOracle for GitCli {
    /// Run `git diff --name-status <from> <to>` with `repo_root` as working directory.
    ///
    /// Renames are reported as a delete plus an add, and paths are printed
    /// unquoted, whatever the user's git configuration says.
    ///
    /// The output is fully drained before returning. On a non-zero exit the
    /// captured stderr becomes the error text.
    fn name_status(&self, repo_root: &Path, from: &str, to: &str) -> Result<Vec<String>> {
        tracing::info!("Running git diff --name-status {} {}", from, to);

        let output = Command::new(&self.program)
            .current_dir(repo_root)
            .args([
                "-c",
                "core.quotePath=false",
                "diff",
                "--no-renames",
                "--name-status",
                from,
                to,
            ])
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::DiffFailed {
                status: output.status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            tracing::warn!(stderr = %stderr.trim_end(), "git diff reported diagnostics");
        }

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect::<Vec<_>>();
        tracing::debug!(count = lines.len(), "git diff finished");

        Ok(lines)
    }
}
