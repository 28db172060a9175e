//! End-to-end sync scenarios
//!
//! A real git repository and the `git` subprocess oracle on one side, the
//! in-memory FTP server on the other, with the orchestrator in between.

use git2ftp_core::{AppliedOperation, Error, Orchestrator, SyncConfiguration};
use git2ftp_ftp::{LoggingTransport, Operation};
use git2ftp_git::GitCli;
use git2ftp_test_utils::git::git;
use git2ftp_test_utils::{MemoryTransport, RecordedOp, TestRepo};
use pretty_assertions::assert_eq;

fn config(repo: &TestRepo, remote: &str, sync: &str, from: Option<&str>, to: &str) -> SyncConfiguration {
    SyncConfiguration::builder(repo.root(), remote, to)
        .sync_subdirectory(sync)
        .from_commit(from.map(str::to_string))
        .build()
        .unwrap()
}

// ============================================================================
// Full runs
// ============================================================================

#[test]
fn test_add_delete_modify_in_diff_order() {
    let repo = TestRepo::new();
    repo.write("src/b.js", "b");
    repo.write("src/c.js", "c1");
    let base = repo.commit("base");
    repo.write("src/a.js", "a");
    repo.remove("src/b.js");
    repo.write("src/c.js", "c2");
    let next = repo.commit("next");

    let mut remote = MemoryTransport::new()
        .with_file("web/.git2ftp", &base)
        .with_file("web/b.js", "b")
        .with_file("web/c.js", "c1");
    let config = config(&repo, "web", "src", None, &next);

    let report = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(
        remote.ops(),
        &[
            RecordedOp::Retrieve("web/.git2ftp".into()),
            RecordedOp::Store("web/a.js".into()),
            RecordedOp::Delete("web/b.js".into()),
            RecordedOp::Store("web/c.js".into()),
            RecordedOp::Store("web/.git2ftp".into()),
            RecordedOp::Quit,
        ]
    );
    assert_eq!(remote.file_string("web/a.js").as_deref(), Some("a"));
    assert_eq!(remote.file_string("web/c.js").as_deref(), Some("c2"));
    assert_eq!(remote.file("web/b.js"), None);
    assert_eq!(remote.file_string("web/.git2ftp"), Some(next.clone()));
    assert_eq!(report.from_commit, base);
    assert_eq!(report.to_commit, next);
}

#[test]
fn test_missing_directories_are_created_then_upload_retried() {
    let repo = TestRepo::new();
    let base = repo.head();
    repo.write("src/new/deep/file.js", "deep");
    let next = repo.commit("deep file");

    let mut remote = MemoryTransport::new().with_dir("web");
    let config = config(&repo, "web", "src", Some(&base), &next);

    let report = Orchestrator::new(&config)
        .sync(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(
        remote.ops(),
        &[
            RecordedOp::Store("web/new/deep/file.js".into()),
            RecordedOp::MakeDir("web/new/deep".into()),
            RecordedOp::MakeDir("web/new".into()),
            RecordedOp::MakeDir("web/new/deep".into()),
            RecordedOp::Store("web/new/deep/file.js".into()),
            RecordedOp::Store("web/.git2ftp".into()),
        ]
    );
    assert!(remote.has_dir("web/new/deep"));
    assert_eq!(remote.file_string("web/new/deep/file.js").as_deref(), Some("deep"));
    assert_eq!(report.directories_created(), 2);
}

#[test]
fn test_second_run_resumes_from_stored_marker() {
    let repo = TestRepo::new();
    let first = repo.head();
    repo.write("site/index.html", "v1");
    let second = repo.commit("index");
    repo.write("site/about.html", "about");
    let third = repo.commit("about");

    let mut remote = MemoryTransport::new().with_dir("public");

    let run = config(&repo, "public", "site", Some(&first), &second);
    Orchestrator::new(&run)
        .run(&GitCli::new(), &mut remote)
        .unwrap();
    assert_eq!(remote.file_string("public/.git2ftp"), Some(second.clone()));

    let resumed = config(&repo, "public", "site", None, &third);
    let report = Orchestrator::new(&resumed)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(report.from_commit, second);
    assert_eq!(
        report.operations,
        vec![AppliedOperation::Store {
            local: "site/about.html".into(),
            remote: "public/about.html".into(),
        }]
    );
    assert_eq!(remote.file_string("public/index.html").as_deref(), Some("v1"));
    assert_eq!(remote.file_string("public/.git2ftp"), Some(third));
}

#[test]
fn test_changes_outside_sync_directory_are_ignored() {
    let repo = TestRepo::new();
    let base = repo.head();
    repo.write("dist/app.js", "app");
    repo.write("docs/guide.md", "guide");
    repo.write("README.md", "changed");
    let next = repo.commit("mixed");

    let mut remote = MemoryTransport::new().with_dir("www");
    let config = config(&repo, "www", "dist", Some(&base), &next);

    Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(
        remote.file_paths(),
        vec!["www/.git2ftp".to_string(), "www/app.js".to_string()]
    );
}

#[test]
fn test_whole_repository_sync_keeps_relative_paths() {
    let repo = TestRepo::new();
    let base = repo.head();
    repo.write("lib/util.js", "util");
    let next = repo.commit("util");

    let mut remote = MemoryTransport::new().with_dir("www").with_dir("www/lib");
    let config = config(&repo, "www", "", Some(&base), &next);

    Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(remote.file_string("www/lib/util.js").as_deref(), Some("util"));
}

#[test]
fn test_renamed_file_is_moved_on_remote() {
    let repo = TestRepo::new();
    git(repo.root(), &["config", "diff.renames", "true"]);
    repo.write("src/a.js", "same content");
    let base = repo.commit("base");
    git(repo.root(), &["mv", "src/a.js", "src/b.js"]);
    let next = repo.commit("rename");

    let mut remote = MemoryTransport::new().with_file("web/a.js", "same content");
    let config = config(&repo, "web", "src", Some(&base), &next);

    Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(
        remote.file_paths(),
        vec!["web/.git2ftp".to_string(), "web/b.js".to_string()]
    );
    assert_eq!(remote.file_string("web/b.js").as_deref(), Some("same content"));
}

#[test]
fn test_non_ascii_file_name_is_uploaded() {
    let repo = TestRepo::new();
    git(repo.root(), &["config", "core.quotePath", "true"]);
    let base = repo.head();
    repo.write("src/café.txt", "menu");
    let next = repo.commit("accents");

    let mut remote = MemoryTransport::new().with_dir("web");
    let config = config(&repo, "web", "src", Some(&base), &next);

    let report = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();

    assert_eq!(report.stored(), 1);
    assert_eq!(remote.file_string("web/café.txt").as_deref(), Some("menu"));
}

#[test]
fn test_report_serializes_for_json_output() {
    let repo = TestRepo::new();
    let base = repo.head();
    repo.write("src/a.js", "a");
    let next = repo.commit("a");

    let mut remote = LoggingTransport::new(MemoryTransport::new().with_dir("web"));
    let config = config(&repo, "web", "src", Some(&base), &next);

    let report = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["marker"], "web/.git2ftp");
    assert_eq!(json["operations"][0]["kind"], "store");
    assert!(remote.inner().quit_called());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_first_run_without_marker_or_from_commit() {
    let repo = TestRepo::new();
    let head = repo.head();
    let mut remote = MemoryTransport::new().with_dir("web");
    let config = config(&repo, "web", "", None, &head);

    let err = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap_err();

    assert!(matches!(err, Error::ResumeNotFound { .. }));
    assert_eq!(remote.file("web/.git2ftp"), None);
}

#[test]
fn test_unknown_commit_surfaces_git_diagnostic() {
    let repo = TestRepo::new();
    let head = repo.head();
    let mut remote = MemoryTransport::new().with_dir("web");
    let config = config(&repo, "web", "", Some("no-such-revision"), &head);

    let err = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap_err();

    match err {
        Error::Diff(git2ftp_git::Error::DiffFailed { stderr, .. }) => {
            assert!(stderr.contains("no-such-revision"), "{stderr}");
        }
        other => panic!("expected diff failure, got {other:?}"),
    }
    assert_eq!(remote.file("web/.git2ftp"), None);
}

#[test]
fn test_rejected_upload_keeps_previous_marker() {
    let repo = TestRepo::new();
    repo.write("src/a.js", "a1");
    let base = repo.commit("base");
    repo.write("src/a.js", "a2");
    let next = repo.commit("next");

    let mut remote = MemoryTransport::new()
        .with_file("web/.git2ftp", &base)
        .fail_always(Operation::Store, "web/a.js", 552);
    let config = config(&repo, "web", "src", None, &next);

    let err = Orchestrator::new(&config)
        .run(&GitCli::new(), &mut remote)
        .unwrap_err();

    assert!(matches!(err.entry_cause(), Error::Transport(e) if e.status() == Some(552)));
    assert_eq!(remote.file_string("web/.git2ftp"), Some(base));
    assert!(remote.quit_called());
}
