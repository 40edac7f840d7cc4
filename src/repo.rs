use crate::status::StatusValue;
use crate::vcs::{CommitRecord, FileChange};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot of one discovered repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    pub path: PathBuf,
    pub branch: String,
    pub status: StatusValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

impl RepositorySummary {
    /// Directory name of the working copy
    pub fn name_for(path: &std::path::Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Full view of one repository, rebuilt on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    pub files: Vec<FileChange>,
    pub recent_commits: Vec<CommitRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}
