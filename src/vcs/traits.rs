/// VCS abstraction layer - the only seam through which scanning, detail and
/// action code reach a version-control tool
use crate::actions::{FileOutcome, FileResult};
use crate::errors::Result;
use crate::vcs::{validate_relative_path, CommitRecord, WorkingTreeStatus};
use std::fs;
use std::path::Path;

/// Name of the metadata entry that marks a repository root
pub const METADATA_DIR: &str = ".git";

/// Operations against one working copy
pub trait VcsClient {
    /// Root of the working copy this client operates on
    fn workdir(&self) -> &Path;

    /// Changed files plus ahead/behind counts against the upstream
    fn status(&self) -> Result<WorkingTreeStatus>;

    /// Short name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// URL of the primary remote, if any remote is configured
    fn remote_url(&self) -> Result<Option<String>>;

    /// Most-recent-first history, optionally limited to one path
    fn log(&self, max_count: usize, file: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Unified diff of one path against the last commit
    fn diff(&self, file: &str) -> Result<String>;

    fn fetch(&self) -> Result<()>;

    fn pull(&self) -> Result<()>;

    fn push(&self) -> Result<()>;

    fn stage_all(&self) -> Result<()>;

    fn stage(&self, paths: &[String]) -> Result<()>;

    fn unstage_all(&self) -> Result<()>;

    fn unstage(&self, paths: &[String]) -> Result<()>;

    fn commit(&self, message: &str) -> Result<()>;

    /// Restore one path to its committed content
    fn restore(&self, path: &str) -> Result<()>;

    /// Whether `path` exists in the commit HEAD points at
    fn has_committed_version(&self, path: &str) -> Result<bool>;

    /// Drop a path from the index; a path that isn't indexed is left alone
    fn forget(&self, path: &str) -> Result<()>;

    /// Discard changes to each path independently
    ///
    /// A path with no committed version is dropped from the index and deleted
    /// from disk instead. Any other restore failure leaves the path untouched.
    /// A failure on one path never stops the others.
    fn discard(&self, paths: &[String]) -> Vec<FileOutcome> {
        paths
            .iter()
            .map(|path| FileOutcome {
                path: path.clone(),
                result: discard_one(self, path),
            })
            .collect()
    }
}

fn discard_one<C: VcsClient + ?Sized>(client: &C, path: &str) -> FileResult {
    if let Err(e) = validate_relative_path(path) {
        return FileResult::Failed(e.to_string());
    }

    let restore_err = match client.restore(path) {
        Ok(()) => return FileResult::Restored,
        Err(e) => e,
    };

    match client.has_committed_version(path) {
        Ok(false) => {}
        Ok(true) => return FileResult::Failed(restore_err.to_string()),
        Err(e) => return FileResult::Failed(format!("{} ({})", restore_err, e)),
    }

    // Never leave a staged add behind for a file that is gone
    if let Err(e) = client.forget(path) {
        return FileResult::Failed(e.to_string());
    }

    tracing::debug!(path, error = %restore_err, "no committed version, removing path");

    let full_path = client.workdir().join(path);
    let removed = match fs::symlink_metadata(&full_path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(&full_path),
        Ok(_) => fs::remove_file(&full_path),
        Err(_) => {
            return FileResult::Failed(format!("{} (and file not found on disk)", restore_err))
        }
    };

    match removed {
        Ok(()) => FileResult::Removed,
        Err(e) => FileResult::Failed(format!("Failed to remove {}: {}", path, e)),
    }
}

/// Opens clients for working-copy paths
pub trait ClientFactory {
    fn open(&self, path: &Path) -> Result<Box<dyn VcsClient>>;
}

/// Whether `path` itself is the root of a working copy
///
/// `.git` may be a directory or, for linked worktrees and submodules, a file.
pub fn is_repository_root(path: &Path) -> bool {
    path.join(METADATA_DIR).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_repository_root_dir_and_file() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain");
        let repo = temp.path().join("repo");
        let linked = temp.path().join("linked");
        fs::create_dir_all(&plain).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(&linked).unwrap();
        fs::write(linked.join(".git"), "gitdir: ../repo/.git/worktrees/linked\n").unwrap();

        assert!(!is_repository_root(&plain));
        assert!(is_repository_root(&repo));
        assert!(is_repository_root(&linked));
    }
}
