/// Action dispatch
///
/// Maps user-facing verbs onto one or more client calls. Everything except
/// `discard` is all-or-nothing at the level of a single git invocation;
/// `discard` handles each path on its own and reports a per-path outcome.
use crate::errors::{DashError, Result};
use crate::launcher::Launcher;
use crate::vcs::traits::ClientFactory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Fetch,
    Pull,
    Push,
    Stage,
    Unstage,
    Commit,
    Discard,
    OpenFolder,
    OpenTerminal,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Fetch,
        Action::Pull,
        Action::Push,
        Action::Stage,
        Action::Unstage,
        Action::Commit,
        Action::Discard,
        Action::OpenFolder,
        Action::OpenTerminal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::Pull => "pull",
            Action::Push => "push",
            Action::Stage => "stage",
            Action::Unstage => "unstage",
            Action::Commit => "commit",
            Action::Discard => "discard",
            Action::OpenFolder => "open-folder",
            Action::OpenTerminal => "open-terminal",
        }
    }

    /// Whether the action can destroy uncommitted work
    pub fn is_destructive(&self) -> bool {
        matches!(self, Action::Discard)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = DashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DashError::InvalidArgument(format!("Unknown action: {}", s)))
    }
}

/// Optional arguments accompanying an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionArgs {
    pub fn with_files(files: Vec<String>) -> Self {
        Self {
            files: Some(files),
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            files: None,
            message: Some(message.into()),
        }
    }

    /// `None` means "every changed file"; an explicit empty list is rejected
    fn selected_files(&self) -> Result<Option<&[String]>> {
        match &self.files {
            None => Ok(None),
            Some(files) if files.is_empty() => Err(DashError::InvalidArgument(
                "File list must not be empty".to_string(),
            )),
            Some(files) => Ok(Some(files.as_slice())),
        }
    }
}

/// What happened to one path during a batch action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileResult {
    /// Reset to its committed content
    Restored,
    /// Had no committed version and was deleted from disk
    Removed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub result: FileResult,
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.result, FileResult::Failed(_))
    }
}

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileOutcome>,
}

impl ActionOutcome {
    fn done(action: Action) -> Self {
        Self {
            action,
            files: Vec::new(),
        }
    }
}

pub struct Dispatcher<'a> {
    factory: &'a dyn ClientFactory,
    launcher: &'a dyn Launcher,
}

impl<'a> Dispatcher<'a> {
    pub fn new(factory: &'a dyn ClientFactory, launcher: &'a dyn Launcher) -> Self {
        Self { factory, launcher }
    }

    /// Parse `action` and run it against the repository at `repo`
    pub fn dispatch(&self, repo: &Path, action: &str, args: &ActionArgs) -> Result<ActionOutcome> {
        let action: Action = action.parse()?;
        self.run(repo, action, args)
    }

    pub fn run(&self, repo: &Path, action: Action, args: &ActionArgs) -> Result<ActionOutcome> {
        if !repo.exists() {
            return Err(DashError::NotFound(format!(
                "Repository not found: {}",
                repo.display()
            )));
        }

        tracing::info!(repo = %repo.display(), action = %action, "dispatching action");

        // Opened lazily; launcher actions never touch git
        let client = || self.factory.open(repo);

        match action {
            Action::OpenFolder => self.launcher.open_folder(repo)?,
            Action::OpenTerminal => self.launcher.open_terminal(repo)?,
            Action::Fetch => client()?.fetch()?,
            Action::Pull => client()?.pull()?,
            Action::Push => client()?.push()?,
            Action::Stage => {
                let files = args.selected_files()?;
                let client = client()?;
                match files {
                    Some(files) => client.stage(files)?,
                    None => client.stage_all()?,
                }
            }
            Action::Unstage => {
                let files = args.selected_files()?;
                let client = client()?;
                match files {
                    Some(files) => client.unstage(files)?,
                    None => client.unstage_all()?,
                }
            }
            Action::Commit => {
                // Checked before touching the repository so the index stays as-is
                let message = args
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .ok_or_else(|| {
                        DashError::InvalidArgument("Commit message required".to_string())
                    })?;
                client()?.commit(message)?
            }
            Action::Discard => {
                let files = args.selected_files()?.ok_or_else(|| {
                    DashError::InvalidArgument("Discard requires a list of files".to_string())
                })?;

                let outcomes = client()?.discard(files);
                let failed: Vec<String> = outcomes
                    .iter()
                    .filter_map(|o| match &o.result {
                        FileResult::Failed(msg) => Some(format!("{} ({})", o.path, msg)),
                        _ => None,
                    })
                    .collect();

                if !failed.is_empty() {
                    tracing::warn!(repo = %repo.display(), failed = failed.len(), "discard partially failed");
                    return Err(DashError::PartialFailure { failed, outcomes });
                }

                return Ok(ActionOutcome {
                    action,
                    files: outcomes,
                });
            }
        }

        Ok(ActionOutcome::done(action))
    }
}
