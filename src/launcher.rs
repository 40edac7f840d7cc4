// Opening a file browser or terminal at a repository path
use crate::errors::{DashError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Hands a directory to the desktop environment
pub trait Launcher {
    fn open_folder(&self, path: &Path) -> Result<()>;

    fn open_terminal(&self, path: &Path) -> Result<()>;
}

/// Launcher backed by the platform's own commands
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Spawn without waiting; the launched program outlives this process
    fn spawn(mut cmd: Command, what: &str) -> Result<()> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| DashError::Tool {
                command: what.to_string(),
                message: e.to_string(),
            })
    }
}

impl Launcher for SystemLauncher {
    fn open_folder(&self, path: &Path) -> Result<()> {
        let cmd = if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("explorer");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        };

        Self::spawn(cmd, "open-folder")
    }

    fn open_terminal(&self, path: &Path) -> Result<()> {
        let cmd = if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.args(["-a", "Terminal"]).arg(path);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "cmd"]).current_dir(path);
            cmd
        } else {
            let terminal =
                std::env::var("TERMINAL").unwrap_or_else(|_| "x-terminal-emulator".to_string());
            let mut cmd = Command::new(terminal);
            cmd.current_dir(path);
            cmd
        };

        Self::spawn(cmd, "open-terminal")
    }
}
