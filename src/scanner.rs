/// Repository discovery
///
/// Walks a directory tree depth-first looking for working-copy roots. Once a
/// directory is identified as a repository its children are never visited, so
/// nested repositories and vendored checkouts inside it are not reported.
/// Traversal is bounded by `ScanConfig::max_depth` (the root is depth 0).
use crate::config::ScanConfig;
use crate::errors::Result;
use crate::repo::RepositorySummary;
use crate::status::{classify, StatusValue};
use crate::vcs::traits::{is_repository_root, ClientFactory};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Scanner<'a> {
    factory: &'a dyn ClientFactory,
    options: ScanConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(factory: &'a dyn ClientFactory, options: ScanConfig) -> Self {
        Self { factory, options }
    }

    /// Find every repository under `root`, sorted case-insensitively by name
    ///
    /// A missing or unreadable root yields an empty list.
    pub fn scan(&self, root: &Path) -> Result<Vec<RepositorySummary>> {
        let root = absolute(root)?;
        let mut repos = Vec::new();

        if !root.exists() {
            tracing::debug!(root = %root.display(), "scan root does not exist");
            return Ok(repos);
        }

        let mut visited = HashSet::new();
        self.walk(&root, 0, &mut visited, &mut repos);

        repos.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });

        tracing::info!(root = %root.display(), found = repos.len(), "scan complete");
        Ok(repos)
    }

    fn walk(
        &self,
        dir: &Path,
        depth: usize,
        visited: &mut HashSet<PathBuf>,
        repos: &mut Vec<RepositorySummary>,
    ) {
        if depth > self.options.max_depth {
            return;
        }

        if self.options.follow_symlinks {
            // Different link paths can lead to the same directory
            match fs::canonicalize(dir) {
                Ok(real) => {
                    if !visited.insert(real) {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unresolvable directory");
                    return;
                }
            }
        }

        if is_repository_root(dir) {
            if let Some(summary) = self.summarize(dir) {
                repos.push(summary);
            }
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "error scanning directory");
                return;
            }
        };

        let mut children = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "error reading directory entry");
                    continue;
                }
            };

            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            if self.is_traversable(&entry) {
                children.push(entry.path());
            }
        }
        children.sort();

        for child in children {
            self.walk(&child, depth + 1, visited, repos);
        }
    }

    fn is_traversable(&self, entry: &fs::DirEntry) -> bool {
        let Ok(file_type) = entry.file_type() else {
            return false;
        };

        if file_type.is_dir() {
            return true;
        }

        file_type.is_symlink()
            && self.options.follow_symlinks
            && fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn summarize(&self, path: &Path) -> Option<RepositorySummary> {
        match self.read_summary(path) {
            Ok(summary) => Some(summary),
            Err(e) if self.options.include_unreadable => {
                tracing::warn!(repo = %path.display(), error = %e, "repository status unreadable");
                Some(RepositorySummary {
                    name: RepositorySummary::name_for(path),
                    path: path.to_path_buf(),
                    branch: "unknown".to_string(),
                    status: StatusValue::Unknown,
                    remote_url: None,
                })
            }
            Err(e) => {
                tracing::debug!(repo = %path.display(), error = %e, "dropping unreadable repository");
                None
            }
        }
    }

    fn read_summary(&self, path: &Path) -> Result<RepositorySummary> {
        let client = self.factory.open(path)?;
        let status = client.status()?;
        let branch = client.current_branch()?;
        let remote_url = client.remote_url().unwrap_or_else(|e| {
            tracing::debug!(repo = %path.display(), error = %e, "remote lookup failed");
            None
        });

        Ok(RepositorySummary {
            name: RepositorySummary::name_for(path),
            path: path.to_path_buf(),
            branch,
            status: classify(status.changed_files.len(), status.ahead, status.behind),
            remote_url,
        })
    }
}

/// Resolve a relative path against the current directory without touching symlinks
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        // Rebuilding from components drops `.` segments
        Ok(std::env::current_dir()?.join(path).components().collect())
    }
}
