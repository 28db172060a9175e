//! Sync command implementation
//!
//! Verifies the requested commits locally, opens the remote session and
//! hands both to the orchestrator.

use colored::Colorize;

use git2ftp_core::{AppliedOperation, Orchestrator, SyncReport};
use git2ftp_ftp::{FtpTransport, LoggingTransport, NoopTransport, Operation, RemoteTransport};
use git2ftp_git::{GitCli, verify_commit};

use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Run one synchronization with fully resolved settings.
pub fn run_sync(settings: &Settings) -> Result<()> {
    let sync = &settings.sync;
    let repo = sync.repository_root();

    let to = verify_commit(repo, sync.to_commit())
        .map_err(|e| CliError::from(e).context("invalid --to-sha"))?;
    tracing::debug!(rev = %sync.to_commit(), commit = %to, "Target commit verified");
    if let Some(from) = sync.from_commit() {
        let resolved = verify_commit(repo, from)
            .map_err(|e| CliError::from(e).context("invalid --from-sha"))?;
        tracing::debug!(rev = %from, commit = %resolved, "Starting commit verified");
    }

    let inner: Box<dyn RemoteTransport> = if settings.dry_run {
        tracing::info!("Dry run: no connection is made and nothing is changed on the remote");
        Box::new(NoopTransport::new())
    } else {
        let transport = FtpTransport::connect(&settings.ftp).map_err(|e| {
            let context = match e.operation() {
                Operation::Login => "cannot login to ftp",
                _ => "cannot dial to ftp",
            };
            CliError::from(e).context(context)
        })?;
        tracing::info!(address = %settings.ftp.address, "Connected");
        Box::new(transport)
    };
    let mut transport = LoggingTransport::new(inner);

    let report = Orchestrator::new(sync)
        .run(&GitCli::new(), &mut transport)
        .map_err(describe_failure)?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, settings.dry_run);
    }

    Ok(())
}

/// Attach the user-facing context for a failed run.
fn describe_failure(err: git2ftp_core::Error) -> CliError {
    use git2ftp_core::Error;

    let context = match &err {
        Error::ResumeNotFound { .. } => Some("you must specify --from-sha".to_string()),
        Error::ResumeRead { .. } => Some("cannot retrieve last sha from ftp".to_string()),
        Error::ResumeWrite { .. } => {
            Some("could not store current sha in ftp remote directory".to_string())
        }
        Error::Logout(_) => Some("cannot logout from ftp".to_string()),
        Error::Diff(_) => Some("cannot list changed files".to_string()),
        Error::Entry { path, .. } => Some(format!("cannot upload file {path} to ftp")),
        _ => None,
    };

    match context {
        Some(context) => CliError::from(err).context(context),
        None => err.into(),
    }
}

fn print_summary(report: &SyncReport, dry_run: bool) {
    let header = if dry_run { "DRY RUN" } else { "OK" };
    for operation in &report.operations {
        let (mark, suffix) = match operation {
            AppliedOperation::Store { .. } => ("+".green(), ""),
            AppliedOperation::Delete { .. } => ("-".red(), ""),
            AppliedOperation::MakeDir { .. } => ("+".green(), "/"),
        };
        println!("   {} {}{}", mark, operation.remote().cyan(), suffix);
    }
    println!(
        "{} {}..{}: {} stored, {} deleted, {} directories created",
        header.green().bold(),
        short(&report.from_commit),
        short(&report.to_commit),
        report.stored(),
        report.deleted(),
        report.directories_created()
    );
}

fn short(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}
