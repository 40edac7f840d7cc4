pub mod git;
pub mod porcelain;
pub mod traits;

#[cfg(test)]
pub mod fake;

use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

use crate::errors::{DashError, Result};

/// A single changed path in a working copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: String,
    pub staged: bool,
}

impl FileChange {
    /// Build a change from the two porcelain status columns (index, worktree)
    pub fn from_columns(path: impl Into<String>, index: char, worktree: char) -> Self {
        let status = if index == '?' {
            "??".to_string()
        } else if worktree != ' ' {
            worktree.to_string()
        } else {
            index.to_string()
        };

        Self {
            path: path.into(),
            status,
            staged: index != '?' && index != ' ',
        }
    }

    pub fn is_untracked(&self) -> bool {
        self.status == "??"
    }
}

/// One entry of commit history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub date: String,
    #[serde(alias = "author_name")]
    pub author_name: String,
}

/// Raw working-tree and branch-tracking state of a working copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    pub changed_files: Vec<FileChange>,
    pub ahead: usize,
    pub behind: usize,
    pub upstream: Option<String>,
}

impl WorkingTreeStatus {
    pub fn is_clean(&self) -> bool {
        self.changed_files.is_empty()
    }
}

/// Safely shorten a commit hash to 7 characters
/// Returns the shortened hash, or the full hash if it's shorter than 7 chars
pub fn short_commit(hash: &str) -> String {
    hash.chars().take(7).collect()
}

/// Reject repo-relative paths that could escape the working copy
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(DashError::InvalidArgument("File path is empty".to_string()));
    }

    let candidate = Path::new(path);
    let escapes = candidate.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes {
        return Err(DashError::InvalidArgument(format!(
            "Path '{}' must be relative to the repository root",
            path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commit() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }

    #[test]
    fn test_file_change_columns() {
        let untracked = FileChange::from_columns("new.txt", '?', '?');
        assert_eq!(untracked.status, "??");
        assert!(!untracked.staged);

        let unstaged = FileChange::from_columns("a.rs", ' ', 'M');
        assert_eq!(unstaged.status, "M");
        assert!(!unstaged.staged);

        let staged = FileChange::from_columns("b.rs", 'A', ' ');
        assert_eq!(staged.status, "A");
        assert!(staged.staged);

        // Staged and then modified again shows the worktree column
        let both = FileChange::from_columns("c.rs", 'M', 'D');
        assert_eq!(both.status, "D");
        assert!(both.staged);
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("src/main.rs").is_ok());
        assert!(validate_relative_path("./notes.md").is_ok());
        assert!(validate_relative_path("../outside").is_err());
        assert!(validate_relative_path("a/../../b").is_err());
        assert!(validate_relative_path("/etc/passwd").is_err());
        assert!(validate_relative_path("  ").is_err());
    }

    #[test]
    fn test_commit_record_accepts_snake_case_author() {
        let json = r#"{"hash":"abc1234","message":"m","date":"2024-01-01T00:00:00+00:00","author_name":"A"}"#;
        let record: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.author_name, "A");
        let out = serde_json::to_string(&record).unwrap();
        assert!(out.contains("\"authorName\":\"A\""));
    }
}
