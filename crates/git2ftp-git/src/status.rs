//! Name-status records produced by `git diff --name-status`

use std::fmt;

/// What happened to a file between two commits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Added,
    Modified,
    Deleted,
    /// Any other status letter (`R`, `C`, `T`, `U`, ...), kept verbatim
    Unknown(String),
}

impl ChangeAction {
    pub fn from_letter(letter: &str) -> Self {
        match letter {
            "A" => ChangeAction::Added,
            "M" => ChangeAction::Modified,
            "D" => ChangeAction::Deleted,
            other => ChangeAction::Unknown(other.to_string()),
        }
    }

    pub fn letter(&self) -> &str {
        match self {
            ChangeAction::Added => "A",
            ChangeAction::Modified => "M",
            ChangeAction::Deleted => "D",
            ChangeAction::Unknown(letter) => letter,
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// One changed file, path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEntry {
    pub action: ChangeAction,
    pub path: String,
}

impl ChangeEntry {
    pub fn new(action: ChangeAction, path: impl Into<String>) -> Self {
        Self {
            action,
            path: path.into(),
        }
    }
}

/// Parse one `<letter><whitespace><path>` line.
///
/// The action is the first character only, so a rename record such as
/// `R100\told\tnew` yields `Unknown("R")`. Blank lines yield `None`.
pub fn parse_name_status_line(line: &str) -> Option<ChangeEntry> {
    if line.trim().is_empty() {
        return None;
    }

    let mut chars = line.chars();
    let letter = chars.next()?.to_string();
    let path = chars.as_str().trim();

    Some(ChangeEntry {
        action: ChangeAction::from_letter(&letter),
        path: path.to_string(),
    })
}
