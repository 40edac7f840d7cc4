// In-memory client for exercising scanning, detail and dispatch without git
use crate::errors::{DashError, Result};
use crate::vcs::traits::{is_repository_root, ClientFactory, VcsClient};
use crate::vcs::{CommitRecord, FileChange, WorkingTreeStatus};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Scripted state of one fake repository
#[derive(Debug, Clone, Default)]
pub struct FakeRepo {
    pub branch: String,
    pub files: Vec<FileChange>,
    pub ahead: usize,
    pub behind: usize,
    pub remote: Option<String>,
    pub commits: Vec<CommitRecord>,
    /// Paths that exist in the last commit
    pub committed: Vec<String>,
    pub fail_status: bool,
    pub fail_log: bool,
    /// Operation names that should fail, e.g. "push"
    pub failing_ops: Vec<String>,
}

impl FakeRepo {
    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            ..Default::default()
        }
    }
}

/// Shared state behind every client the factory hands out
#[derive(Clone, Default)]
pub struct FakeFactory {
    repos: Arc<Mutex<HashMap<PathBuf, FakeRepo>>>,
    calls: Arc<Mutex<Vec<String>>>,
    accept_any: bool,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open any directory with a `.git` entry, not only registered ones
    pub fn accepting_any(mut self) -> Self {
        self.accept_any = true;
        self
    }

    pub fn insert(&self, path: &Path, repo: FakeRepo) {
        self.repos.lock().unwrap().insert(path.to_path_buf(), repo);
    }

    pub fn repo(&self, path: &Path) -> FakeRepo {
        self.repos.lock().unwrap().get(path).cloned().unwrap_or_default()
    }

    /// Recorded calls, formatted as "op" or "op:arg1,arg2"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClientFactory for FakeFactory {
    fn open(&self, path: &Path) -> Result<Box<dyn VcsClient>> {
        let known = self.repos.lock().unwrap().contains_key(path);
        if !known && !(self.accept_any && is_repository_root(path)) {
            return Err(DashError::NotARepository(path.display().to_string()));
        }
        Ok(Box::new(FakeClient {
            workdir: path.to_path_buf(),
            factory: self.clone(),
        }))
    }
}

pub struct FakeClient {
    workdir: PathBuf,
    factory: FakeFactory,
}

impl FakeClient {
    fn record(&self, op: &str, args: &[String]) -> Result<()> {
        let entry = if args.is_empty() {
            op.to_string()
        } else {
            format!("{}:{}", op, args.join(","))
        };
        self.factory.calls.lock().unwrap().push(entry);

        if self.with_repo(|r| r.failing_ops.iter().any(|f| f == op)) {
            return Err(DashError::Tool {
                command: format!("git {}", op),
                message: format!("scripted {} failure", op),
            });
        }
        Ok(())
    }

    fn with_repo<T>(&self, f: impl FnOnce(&mut FakeRepo) -> T) -> T {
        let mut repos = self.factory.repos.lock().unwrap();
        let repo = repos.entry(self.workdir.clone()).or_default();
        f(repo)
    }

    fn set_staged(&self, paths: Option<&[String]>, staged: bool) {
        self.with_repo(|repo| {
            for file in repo.files.iter_mut() {
                if paths.map_or(true, |p| p.contains(&file.path)) {
                    if staged && file.status == "??" {
                        file.status = "A".to_string();
                    } else if !staged && file.status == "A" && !repo.committed.contains(&file.path)
                    {
                        file.status = "??".to_string();
                    }
                    file.staged = staged && file.status != "??";
                }
            }
        });
    }
}

impl VcsClient for FakeClient {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn status(&self) -> Result<WorkingTreeStatus> {
        self.with_repo(|repo| {
            if repo.fail_status {
                return Err(DashError::Tool {
                    command: "git status".to_string(),
                    message: "scripted status failure".to_string(),
                });
            }
            Ok(WorkingTreeStatus {
                changed_files: repo.files.clone(),
                ahead: repo.ahead,
                behind: repo.behind,
                upstream: None,
            })
        })
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.with_repo(|repo| repo.branch.clone()))
    }

    fn remote_url(&self) -> Result<Option<String>> {
        Ok(self.with_repo(|repo| repo.remote.clone()))
    }

    fn log(&self, max_count: usize, file: Option<&str>) -> Result<Vec<CommitRecord>> {
        let args: Vec<String> = file.map(|f| vec![f.to_string()]).unwrap_or_default();
        self.record("log", &args)?;
        self.with_repo(|repo| {
            if repo.fail_log {
                return Err(DashError::Tool {
                    command: "git log".to_string(),
                    message: "does not have any commits yet".to_string(),
                });
            }
            Ok(repo.commits.iter().take(max_count).cloned().collect())
        })
    }

    fn diff(&self, file: &str) -> Result<String> {
        self.record("diff", &[file.to_string()])?;
        Ok(format!("diff --fake a/{0} b/{0}", file))
    }

    fn fetch(&self) -> Result<()> {
        self.record("fetch", &[])
    }

    fn pull(&self) -> Result<()> {
        self.record("pull", &[])
    }

    fn push(&self) -> Result<()> {
        self.record("push", &[])
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage_all", &[])?;
        self.set_staged(None, true);
        Ok(())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.record("stage", paths)?;
        self.set_staged(Some(paths), true);
        Ok(())
    }

    fn unstage_all(&self) -> Result<()> {
        self.record("unstage_all", &[])?;
        self.set_staged(None, false);
        Ok(())
    }

    fn unstage(&self, paths: &[String]) -> Result<()> {
        self.record("unstage", paths)?;
        self.set_staged(Some(paths), false);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record("commit", &[message.to_string()])?;
        self.with_repo(|repo| repo.files.retain(|f| !f.staged));
        Ok(())
    }

    fn restore(&self, path: &str) -> Result<()> {
        self.record("restore", &[path.to_string()])?;
        self.with_repo(|repo| {
            if !repo.committed.iter().any(|c| c == path) {
                return Err(DashError::Tool {
                    command: "git checkout".to_string(),
                    message: format!("pathspec '{}' did not match any file(s) known to git", path),
                });
            }
            repo.files.retain(|f| f.path != path);
            Ok(())
        })
    }

    fn has_committed_version(&self, path: &str) -> Result<bool> {
        Ok(self.with_repo(|repo| repo.committed.iter().any(|c| c == path)))
    }

    fn forget(&self, path: &str) -> Result<()> {
        self.record("forget", &[path.to_string()])?;
        self.with_repo(|repo| repo.files.retain(|f| f.path != path));
        Ok(())
    }
}
