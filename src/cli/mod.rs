// Command-line front end over the dashboard core
pub mod browse;
pub mod config_cmd;
pub mod diff;
pub mod history;
pub mod info;
pub mod run;
pub mod scan;

use crate::config::Config;
use crate::errors::Result;
use crate::status::StatusValue;
use crate::vcs::git::GitClientFactory;
use colored::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Effective configuration plus the git client factory built from it
pub struct Context {
    pub config: Config,
    pub factory: GitClientFactory,
}

impl Context {
    /// Load configuration layers for the current directory
    pub fn load() -> Result<Self> {
        let current_dir = env::current_dir()?;
        let config = Config::load(&current_dir)?;
        let factory = GitClientFactory::new(config.git.binary.clone());

        Ok(Self { config, factory })
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve a command-line path against the current directory
pub(crate) fn resolve(path: &Path) -> Result<PathBuf> {
    crate::scanner::absolute(path)
}

pub(crate) fn status_label(status: StatusValue) -> ColoredString {
    let label = status.as_str();
    match status {
        StatusValue::Clean => label.bright_green(),
        StatusValue::Dirty => label.bright_red(),
        StatusValue::Ahead => label.bright_cyan(),
        StatusValue::Behind => label.bright_yellow(),
        StatusValue::Diverged => label.bright_magenta(),
        StatusValue::Unknown => label.dimmed(),
    }
}
