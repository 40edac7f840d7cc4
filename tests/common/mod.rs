/// Common test utilities for repodash integration tests
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir`, panicking on failure, and return stdout
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
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
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Initialize an empty repository at `dir` on branch `main`
pub fn init_repo(dir: &Path) {
    std::fs::create_dir_all(dir).expect("Failed to create repo directory");
    git(dir, &["init", "-q"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    // Disable GPG signing for tests
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// A test repository with temporary directory management
#[allow(dead_code)]
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub repo_path: PathBuf,
}

#[allow(dead_code)]
impl TestRepo {
    /// Create a repository with one commit on `main`
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.create_and_commit("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Create a repository without any commits
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Subdirectory so the temp dir can also hold config and state
        let repo_path = temp_dir.path().join("repo");
        init_repo(&repo_path);

        TestRepo {
            temp_dir,
            repo_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.repo_path
    }

    pub fn write_file(&self, filename: &str, content: &str) {
        let path = self.repo_path.join(filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, filename: &str) -> String {
        std::fs::read_to_string(self.repo_path.join(filename)).expect("Failed to read file")
    }

    /// Create a file and commit it
    pub fn create_and_commit(&self, filename: &str, content: &str, message: &str) {
        self.write_file(filename, content);
        git(&self.repo_path, &["add", filename]);
        git(&self.repo_path, &["commit", "-q", "-m", message]);
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(&self.repo_path, args)
    }

    /// Two-column porcelain status code for one path ("" when unchanged)
    pub fn status_code(&self, filename: &str) -> String {
        let out = self.git(&["status", "--porcelain=v1", "--untracked-files=all", "--", filename]);
        out.lines()
            .next()
            .map(|line| line[..2].to_string())
            .unwrap_or_default()
    }

    /// Run rdash in this repository with isolated config and state
    pub fn rdash(&self, args: &[&str]) -> CommandResult {
        rdash_in(&self.repo_path, self.temp_dir.path(), args)
    }
}

/// Run rdash in `dir`, keeping config and state under `sandbox`
#[allow(dead_code)]
pub fn rdash_in(dir: &Path, sandbox: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(env!("CARGO_BIN_EXE_rdash"))
        .args(args)
        .current_dir(dir)
        .env("RDASH_CONFIG_DIR", sandbox.join("config"))
        .env("RDASH_STATE_DIR", sandbox.join("state"))
        .env("NO_COLOR", "1")
        .env_remove("RDASH_LOG")
        .output()
        .expect("Failed to execute rdash command");

    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
        exit_code: output.status.code(),
    }
}

/// Result of running a command
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

#[allow(dead_code)]
impl CommandResult {
    /// Assert the command succeeded
    pub fn assert_success(&self) {
        if !self.success {
            panic!(
                "Command failed:\nstdout: {}\nstderr: {}\nexit code: {:?}",
                self.stdout, self.stderr, self.exit_code
            );
        }
    }

    /// Assert the command failed
    pub fn assert_failure(&self) {
        if self.success {
            panic!(
                "Command succeeded when it should have failed:\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
    }

    pub fn assert_stdout_contains(&self, text: &str) {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain '{}'\nstdout: {}",
            text,
            self.stdout
        );
    }

    pub fn assert_stderr_contains(&self, text: &str) {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain '{}'\nstderr: {}",
            text,
            self.stderr
        );
    }
}
