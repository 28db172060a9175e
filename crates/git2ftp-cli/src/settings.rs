//! Settings resolution
//!
//! Merges command-line/environment values over an optional TOML settings
//! file, checks that required values are present, and produces the immutable
//! configuration values the sync needs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use git2ftp_core::SyncConfiguration;
use git2ftp_ftp::{DEFAULT_TIMEOUT, FtpSettings};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Contents of a `--config` file. Keys mirror the flag names.
///
/// ```toml
/// git-directory = "/srv/site"
/// remote-directory = "www"
/// sync-directory = "dist"
/// ftp-url = "ftp.example.org:21"
/// ftp-user = "deploy"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSettings {
    pub git_directory: Option<PathBuf>,
    pub remote_directory: Option<String>,
    pub from_sha: Option<String>,
    pub to_sha: Option<String>,
    pub sync_directory: Option<String>,
    pub ftp_url: Option<String>,
    pub ftp_user: Option<String>,
    pub ftp_password: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CliError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Everything a run needs, fully validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sync: SyncConfiguration,
    pub ftp: FtpSettings,
    pub dry_run: bool,
    pub json: bool,
}

impl Settings {
    /// Resolve settings from parsed arguments, reading `--config` if given.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge `cli` over `file` and validate.
    ///
    /// # Errors
    ///
    /// Returns a user error when a required value is missing, when only one
    /// of user/password is given, or when a dry run lacks a starting commit;
    /// a core configuration error when the target commit is `HEAD`.
    pub fn merge(cli: &Cli, file: FileSettings) -> Result<Self> {
        let git_directory = required("git-directory", cli.git_directory.clone(), file.git_directory)?;
        let remote_directory = required(
            "remote-directory",
            cli.remote_directory.clone(),
            file.remote_directory,
        )?;
        let to_sha = required("to-sha", cli.to_sha.clone(), file.to_sha)?;
        let ftp_url = required("ftp-url", cli.ftp_url.clone(), file.ftp_url)?;

        let from_sha = cli.from_sha.clone().or(file.from_sha);
        let sync_directory = cli
            .sync_directory
            .clone()
            .or(file.sync_directory)
            .unwrap_or_default();
        let user = cli.ftp_user.clone().or(file.ftp_user);
        let password = cli.ftp_password.clone().or(file.ftp_password);
        let timeout = cli
            .timeout_secs
            .or(file.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let sync = SyncConfiguration::builder(git_directory, remote_directory, to_sha)
            .sync_subdirectory(sync_directory)
            .from_commit(from_sha)
            .build()?;

        let mut ftp = FtpSettings::new(ftp_url).with_timeout(timeout);
        match (user, password) {
            (Some(user), Some(password)) => ftp = ftp.with_credentials(user, password),
            (None, None) => {}
            _ => {
                return Err(CliError::user(
                    "ftp-user must be specified with ftp-password",
                ));
            }
        }

        if cli.dry_run && sync.from_commit().is_none() {
            return Err(CliError::user(
                "--dry-run does not read the remote resume point; --from-sha is required",
            ));
        }

        Ok(Self {
            sync,
            ftp,
            dry_run: cli.dry_run,
            json: cli.json,
        })
    }
}

fn required<T>(flag: &str, cli: Option<T>, file: Option<T>) -> Result<T> {
    cli.or(file).ok_or_else(|| {
        CliError::user(format!(
            "--{flag} is required (flag, GIT2FTP_{} or settings file)",
            flag.to_uppercase().replace('-', "_")
        ))
    })
}
