//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// git2ftp - Transfer your git commits to a distant FTP server
///
/// Uploads the files changed between two commits and records the last
/// synchronized commit in `<remote-directory>/.git2ftp`, so the next run
/// only needs --to-sha.
///
/// Every option can also come from a GIT2FTP_* environment variable or from
/// the settings file given with --config. Command-line values win.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "git2ftp")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML settings file providing defaults for the options below
    #[arg(long, env = "GIT2FTP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory of the git repository on your local machine
    #[arg(long, env = "GIT2FTP_GIT_DIRECTORY", value_name = "DIR")]
    pub git_directory: Option<PathBuf>,

    /// Remote directory where you want to upload your files
    #[arg(long, env = "GIT2FTP_REMOTE_DIRECTORY", value_name = "DIR")]
    pub remote_directory: Option<String>,

    /// Commit to synchronize from (defaults to the commit stored on the remote)
    #[arg(long, env = "GIT2FTP_FROM_SHA", value_name = "SHA")]
    pub from_sha: Option<String>,

    /// Commit to synchronize to. Don't use HEAD
    #[arg(long, env = "GIT2FTP_TO_SHA", value_name = "SHA")]
    pub to_sha: Option<String>,

    /// Directory to synchronize, relative to --git-directory (defaults to the whole repository)
    #[arg(long, env = "GIT2FTP_SYNC_DIRECTORY", value_name = "DIR")]
    pub sync_directory: Option<String>,

    /// Address of the FTP server, of the form ftp.example.org:21
    #[arg(long, env = "GIT2FTP_FTP_URL", value_name = "HOST:PORT")]
    pub ftp_url: Option<String>,

    /// User to log in with (requires --ftp-password)
    #[arg(long, env = "GIT2FTP_FTP_USER")]
    pub ftp_user: Option<String>,

    /// Password for --ftp-user
    #[arg(long, env = "GIT2FTP_FTP_PASSWORD", hide_env_values = true)]
    pub ftp_password: Option<String>,

    /// Dial timeout in seconds
    #[arg(long, env = "GIT2FTP_TIMEOUT_SECS", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Log what would be done without connecting to the server (requires --from-sha)
    #[arg(long)]
    pub dry_run: bool,

    /// Print the sync report as JSON
    #[arg(long)]
    pub json: bool,
}
