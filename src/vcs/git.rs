use crate::errors::{DashError, Result};
use crate::vcs::porcelain::{self, LOG_FORMAT};
use crate::vcs::traits::{ClientFactory, VcsClient};
use crate::vcs::{validate_relative_path, CommitRecord, WorkingTreeStatus};
use git2::{ErrorCode, Repository};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Text returned by [`GitClient::diff`] when a path has nothing to show
pub const NO_CHANGES: &str = "No changes or file not found.";

/// Helper to extract meaningful error message from git command output
fn git_error_from_output(output: &Output, context: &str) -> DashError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let exit_code = output.status.code().unwrap_or(-1);

    let message = if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else if !stdout.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        format!("exit code: {}", exit_code)
    };

    DashError::Tool {
        command: context.to_string(),
        message,
    }
}

/// Client that shells out to the `git` binary for one working copy
pub struct GitClient {
    repo: Repository,
    workdir: PathBuf,
    binary: String,
}

impl GitClient {
    /// Open the working copy rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P, binary: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DashError::NotFound(path.display().to_string()));
        }

        let repo = Repository::open(path)
            .map_err(|_| DashError::NotARepository(path.display().to_string()))?;
        if repo.is_bare() {
            return Err(DashError::NotARepository(path.display().to_string()));
        }

        Ok(Self {
            repo,
            workdir: path.to_path_buf(),
            binary: binary.to_string(),
        })
    }

    fn command<S: AsRef<std::ffi::OsStr>>(&self, args: &[S]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-C")
            .arg(&self.workdir)
            .args(args)
            // Stable English output for the porcelain headers we parse
            .env("LC_ALL", "C")
            // Never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    /// Run git and return stdout, or a tool error carrying stderr
    fn run<S: AsRef<std::ffi::OsStr>>(&self, args: &[S]) -> Result<String> {
        let context = describe(&self.binary, args);
        tracing::debug!(workdir = %self.workdir.display(), command = %context, "running git");

        let output = self
            .command(args)
            .output()
            .map_err(|e| DashError::Tool {
                command: context.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(git_error_from_output(&output, &context));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_with_paths(&self, base: &[&str], paths: &[String]) -> Result<()> {
        for path in paths {
            validate_relative_path(path)?;
        }

        let mut args: Vec<&str> = base.to_vec();
        args.push("--");
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).map(|_| ())
    }

    /// Whether HEAD points at a commit (false on a brand-new repository)
    fn has_head(&self) -> bool {
        self.repo.head().is_ok()
    }

    fn is_tracked(&self, file: &str) -> bool {
        self.run(&["ls-files", "--error-unmatch", "--", file]).is_ok()
    }

    /// Listing of an untracked file with every line marked as added
    fn synthesize_addition(&self, file: &str) -> Option<String> {
        let full_path = self.workdir.join(file);
        if !full_path.is_file() {
            return None;
        }

        let bytes = fs::read(&full_path).ok()?;
        let content = String::from_utf8_lossy(&bytes);
        Some(
            content
                .lines()
                .map(|line| format!("+{}", line))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

fn describe<S: AsRef<std::ffi::OsStr>>(binary: &str, args: &[S]) -> String {
    let mut parts = vec![binary.to_string()];
    if let Some(sub) = args.first() {
        parts.push(sub.as_ref().to_string_lossy().into_owned());
    }
    parts.join(" ")
}

impl VcsClient for GitClient {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn status(&self) -> Result<WorkingTreeStatus> {
        let stdout = self.run(&[
            "status",
            "--porcelain=v1",
            "--branch",
            "-z",
            "--untracked-files=all",
        ])?;
        Ok(porcelain::parse_status(&stdout))
    }

    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => {
                if head.is_branch() {
                    Ok(head.shorthand().unwrap_or("HEAD").to_string())
                } else {
                    Ok("HEAD".to_string())
                }
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD is still a symbolic ref to the branch-to-be
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remote_url(&self) -> Result<Option<String>> {
        if let Ok(origin) = self.repo.find_remote("origin") {
            return Ok(origin.url().map(str::to_string));
        }

        let remotes = self.repo.remotes()?;
        let first = remotes.iter().flatten().next();
        match first {
            Some(name) => {
                let remote = self.repo.find_remote(name)?;
                Ok(remote.url().map(str::to_string))
            }
            None => Ok(None),
        }
    }

    fn log(&self, max_count: usize, file: Option<&str>) -> Result<Vec<CommitRecord>> {
        let count = max_count.to_string();
        let mut args = vec!["log", "-n", count.as_str(), LOG_FORMAT];
        if let Some(file) = file {
            validate_relative_path(file)?;
            args.push("--");
            args.push(file);
        }

        let stdout = self.run(&args)?;
        Ok(porcelain::parse_log(&stdout))
    }

    fn diff(&self, file: &str) -> Result<String> {
        validate_relative_path(file)?;

        // Fails without any commit; fall through to index/worktree diffs
        if let Ok(against_head) = self.run(&["diff", "HEAD", "--", file]) {
            if !against_head.trim().is_empty() {
                return Ok(against_head);
            }
        }

        let staged = self.run(&["diff", "--cached", "--", file])?;
        let unstaged = self.run(&["diff", "--", file])?;
        let combined = format!("{}{}", staged, unstaged);
        if !combined.trim().is_empty() {
            return Ok(combined);
        }

        if !self.is_tracked(file) {
            if let Some(listing) = self.synthesize_addition(file) {
                return Ok(listing);
            }
        }

        Ok(NO_CHANGES.to_string())
    }

    fn fetch(&self) -> Result<()> {
        self.run(&["fetch"]).map(|_| ())
    }

    fn pull(&self) -> Result<()> {
        self.run(&["pull"]).map(|_| ())
    }

    fn push(&self) -> Result<()> {
        self.run(&["push"]).map(|_| ())
    }

    fn stage_all(&self) -> Result<()> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.run_with_paths(&["add"], paths)
    }

    fn unstage_all(&self) -> Result<()> {
        if self.has_head() {
            self.run(&["reset", "-q", "HEAD"]).map(|_| ())
        } else {
            self.run(&["rm", "-r", "-q", "--cached", "--ignore-unmatch", "."])
                .map(|_| ())
        }
    }

    fn unstage(&self, paths: &[String]) -> Result<()> {
        if self.has_head() {
            self.run_with_paths(&["reset", "-q", "HEAD"], paths)
        } else {
            self.run_with_paths(&["rm", "-r", "-q", "--cached", "--ignore-unmatch"], paths)
        }
    }

    fn commit(&self, message: &str) -> Result<()> {
        if message.trim().is_empty() {
            return Err(DashError::InvalidArgument(
                "Commit message required".to_string(),
            ));
        }
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    /// Restore index and worktree copies of `path` from HEAD
    fn restore(&self, path: &str) -> Result<()> {
        validate_relative_path(path)?;
        self.run(&["checkout", "HEAD", "--", path]).map(|_| ())
    }

    fn has_committed_version(&self, path: &str) -> Result<bool> {
        validate_relative_path(path)?;

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(false)
            }
            Err(e) => return Err(e.into()),
        };
        let tree = head.peel_to_tree()?;

        // Rebuilt from components so a trailing slash doesn't defeat the lookup
        let rel: PathBuf = Path::new(path).components().collect();
        match tree.get_path(&rel) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn forget(&self, path: &str) -> Result<()> {
        validate_relative_path(path)?;
        self.run(&["rm", "-r", "-q", "--cached", "--ignore-unmatch", "--", path])
            .map(|_| ())
    }
}

/// Opens [`GitClient`]s using a configurable git binary
#[derive(Debug, Clone)]
pub struct GitClientFactory {
    binary: String,
}

impl GitClientFactory {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GitClientFactory {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ClientFactory for GitClientFactory {
    fn open(&self, path: &Path) -> Result<Box<dyn VcsClient>> {
        Ok(Box::new(GitClient::open(path, &self.binary)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    }

    #[test]
    fn test_open_rejects_plain_directory() {
        let temp = TempDir::new().unwrap();
        let result = GitClient::open(temp.path(), "git");
        assert!(matches!(result, Err(DashError::NotARepository(_))));
    }

    #[test]
    fn test_open_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = GitClient::open(temp.path().join("gone"), "git");
        assert!(matches!(result, Err(DashError::NotFound(_))));
    }

    #[test]
    fn test_unborn_branch_name_and_empty_log() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());

        let client = GitClient::open(temp.path(), "git").unwrap();
        assert_eq!(client.current_branch().unwrap(), "main");
        assert!(client.log(5, None).is_err());
        assert_eq!(client.remote_url().unwrap(), None);
    }

    #[test]
    fn test_remote_url_prefers_origin() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        git(temp.path(), &["remote", "add", "backup", "https://example.com/backup.git"]);
        git(temp.path(), &["remote", "add", "origin", "git@github.com:me/proj.git"]);

        let client = GitClient::open(temp.path(), "git").unwrap();
        assert_eq!(
            client.remote_url().unwrap().as_deref(),
            Some("git@github.com:me/proj.git")
        );
    }

    #[test]
    fn test_missing_binary_is_tool_error() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());

        let client = GitClient::open(temp.path(), "definitely-not-a-git-binary").unwrap();
        let err = client.status().unwrap_err();
        assert!(matches!(err, DashError::Tool { .. }));
    }

    #[test]
    fn test_has_committed_version() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());

        let client = GitClient::open(temp.path(), "git").unwrap();
        assert!(!client.has_committed_version("a.txt").unwrap());

        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src").join("a.txt"), "a").unwrap();
        git(temp.path(), &["add", "."]);
        git(temp.path(), &["commit", "-q", "-m", "Add a"]);
        fs::write(temp.path().join("b.txt"), "b").unwrap();

        let client = GitClient::open(temp.path(), "git").unwrap();
        assert!(client.has_committed_version("src/a.txt").unwrap());
        assert!(client.has_committed_version("src/").unwrap());
        assert!(!client.has_committed_version("b.txt").unwrap());
    }

    #[test]
    fn test_commit_rejects_blank_message() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());

        let client = GitClient::open(temp.path(), "git").unwrap();
        assert!(matches!(
            client.commit("   "),
            Err(DashError::InvalidArgument(_))
        ));
    }
}
