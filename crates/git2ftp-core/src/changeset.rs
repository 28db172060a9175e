//! Change set resolution: diff output filtered to the sync subdirectory.

use std::path::Path;

use git2ftp_git::{ChangeEntry, DiffOracle, parse_name_status_line};

use crate::Result;

/// Turns diff oracle output into the ordered list of entries to apply.
pub struct ChangeSetResolver<'a, O: DiffOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: DiffOracle + ?Sized> ChangeSetResolver<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Diff `from` against `to` and keep entries under `sync_subdirectory`.
    ///
    /// Filtering is a plain string prefix match: `sync/` keeps `sync/a`,
    /// while `sync` also keeps `sync2/a`. Emission order is preserved and
    /// unknown status letters pass through untouched.
    pub fn resolve(
        &self,
        repository_root: &Path,
        from: &str,
        to: &str,
        sync_subdirectory: &str,
    ) -> Result<Vec<ChangeEntry>> {
        let lines = self.oracle.name_status(repository_root, from, to)?;

        let entries = lines
            .iter()
            .filter_map(|line| parse_name_status_line(line))
            .filter(|entry| {
                let keep = entry.path.starts_with(sync_subdirectory);
                if !keep {
                    tracing::trace!(path = %entry.path, "Outside sync directory, skipped");
                }
                keep
            })
            .collect();

        Ok(entries)
    }
}

/// Map a repository path to its remote path by replacing the first
/// occurrence of `sync_subdirectory` with `remote_root`.
///
/// `src/app/index.js` with `src/` → `public/` becomes `public/app/index.js`.
/// An empty `sync_subdirectory` simply prefixes `remote_root`.
pub fn remote_path(local_path: &str, sync_subdirectory: &str, remote_root: &str) -> String {
    local_path.replacen(sync_subdirectory, remote_root, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2ftp_git::ChangeAction;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Replays canned diff output.
    struct CannedDiff(Vec<&'static str>);

    impl DiffOracle for CannedDiff {
        fn name_status(&self, _: &Path, _: &str, _: &str) -> git2ftp_git::Result<Vec<String>> {
            Ok(self.0.iter().map(|l| l.to_string()).collect())
        }
    }

    struct FailingDiff;

    impl DiffOracle for FailingDiff {
        fn name_status(&self, _: &Path, _: &str, _: &str) -> git2ftp_git::Result<Vec<String>> {
            Err(git2ftp_git::Error::DiffFailed {
                status: "exit status: 128".into(),
                stderr: "fatal: bad revision 'nope'".into(),
            })
        }
    }

    fn resolve(lines: Vec<&'static str>, sync: &str) -> Vec<ChangeEntry> {
        let oracle = CannedDiff(lines);
        ChangeSetResolver::new(&oracle)
            .resolve(Path::new("/repo"), "a", "b", sync)
            .unwrap()
    }

    #[test]
    fn test_prefix_filter_excludes_other_directories() {
        let entries = resolve(vec!["M\tdocs/readme.md", "A\tsrc/a.js"], "src/");
        assert_eq!(entries, vec![ChangeEntry::new(ChangeAction::Added, "src/a.js")]);
    }

    #[test]
    fn test_empty_sync_directory_keeps_everything() {
        let entries = resolve(vec!["M\tdocs/readme.md", "A\tsrc/a.js"], "");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "docs/readme.md");
    }

    #[test]
    fn test_prefix_match_is_not_segment_aware() {
        let entries = resolve(vec!["A\tsync2/file", "A\tsync/file"], "sync");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_order_is_preserved_and_scored_records_fall_outside_prefix() {
        let entries = resolve(
            vec!["A\tsrc/a.js", "R100\tsrc/x.js\tsrc/y.js", "T\tsrc/link", "D\tsrc/b.js", ""],
            "src/",
        );
        let actions: Vec<_> = entries.iter().map(|e| e.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                ChangeAction::Added,
                ChangeAction::Unknown("T".into()),
                ChangeAction::Deleted
            ]
        );
    }

    #[test]
    fn test_scored_record_is_kept_without_sync_directory() {
        let entries = resolve(vec!["R100\tsrc/x.js\tsrc/y.js"], "");
        assert_eq!(
            entries,
            vec![ChangeEntry::new(
                ChangeAction::Unknown("R".into()),
                "100\tsrc/x.js\tsrc/y.js"
            )]
        );
    }

    #[test]
    fn test_oracle_failure_surfaces_stderr() {
        let err = ChangeSetResolver::new(&FailingDiff)
            .resolve(Path::new("/repo"), "nope", "b", "")
            .unwrap_err();
        assert!(err.to_string().contains("fatal: bad revision 'nope'"));
    }

    #[rstest]
    #[case("src/app/index.js", "src/", "public/", "public/app/index.js")]
    #[case("src/a.js", "", "web/", "web/src/a.js")]
    #[case("src/a.js", "", "", "src/a.js")]
    #[case("src/a.js", "src/", "", "a.js")]
    #[case("src/nested/src/a.js", "src/", "www/", "www/nested/src/a.js")]
    fn test_remote_path(
        #[case] local: &str,
        #[case] sync: &str,
        #[case] remote_root: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(remote_path(local, sync, remote_root), expected);
    }
}
