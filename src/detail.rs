use crate::config::DetailConfig;
use crate::errors::{DashError, Result};
use crate::remote;
use crate::repo::{RepositoryDetail, RepositorySummary};
use crate::status::classify;
use crate::vcs::traits::ClientFactory;
use crate::vcs::CommitRecord;
use std::path::Path;

/// Builds full views of one repository; nothing is cached between calls
pub struct DetailService<'a> {
    factory: &'a dyn ClientFactory,
    options: DetailConfig,
}

impl<'a> DetailService<'a> {
    pub fn new(factory: &'a dyn ClientFactory, options: DetailConfig) -> Self {
        Self { factory, options }
    }

    /// Status, recent history and remote of the repository at `repo`
    ///
    /// Returns `Ok(None)` when the path no longer exists.
    pub fn detail(&self, repo: &Path) -> Result<Option<RepositoryDetail>> {
        if !repo.exists() {
            return Ok(None);
        }

        let client = self.factory.open(repo)?;
        let status = client.status()?;
        let branch = client.current_branch()?;

        // A repository without commits has no history yet
        let recent_commits = client
            .log(self.options.recent_commits, None)
            .unwrap_or_else(|e| {
                tracing::debug!(repo = %repo.display(), error = %e, "no commit history");
                Vec::new()
            });

        let remote_url = client.remote_url()?;
        let web_url = remote_url
            .as_deref()
            .map(|url| remote::web_url(url, Some(&branch)))
            .filter(|url| !url.is_empty());

        let summary = RepositorySummary {
            name: RepositorySummary::name_for(repo),
            path: repo.to_path_buf(),
            branch,
            status: classify(status.changed_files.len(), status.ahead, status.behind),
            remote_url,
        };

        Ok(Some(RepositoryDetail {
            summary,
            files: status.changed_files,
            recent_commits,
            web_url,
        }))
    }

    /// Diff of one file against the last commit
    pub fn file_diff(&self, repo: &Path, file: &str) -> Result<String> {
        self.ensure_exists(repo)?;
        let client = self.factory.open(repo)?;
        client.diff(file)
    }

    /// Commits touching one file, most recent first
    pub fn file_history(&self, repo: &Path, file: &str) -> Result<Vec<CommitRecord>> {
        self.ensure_exists(repo)?;
        let client = self.factory.open(repo)?;
        match client.log(self.options.file_history, Some(file)) {
            Ok(history) => Ok(history),
            Err(DashError::Tool { message, .. }) => {
                tracing::debug!(repo = %repo.display(), file, %message, "no history for file");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn ensure_exists(&self, repo: &Path) -> Result<()> {
        if repo.exists() {
            Ok(())
        } else {
            Err(DashError::NotFound(format!(
                "Repository not found: {}",
                repo.display()
            )))
        }
    }
}
