use crate::cli::{resolve, Context};
use crate::detail::DetailService;
use crate::errors::Result;
use crate::vcs::git::NO_CHANGES;
use colored::*;
use std::path::Path;

/// Print the diff of one file, colored like `git diff`
pub fn run(path: &Path, file: &str) -> Result<()> {
    let repo = resolve(path)?;
    let ctx = Context::load()?;
    let diff = DetailService::new(&ctx.factory, ctx.config.detail.clone()).file_diff(&repo, file)?;

    if diff == NO_CHANGES {
        println!("{}", diff.dimmed());
        return Ok(());
    }

    for line in diff.lines() {
        println!("{}", colorize(line));
    }

    Ok(())
}

fn colorize(line: &str) -> ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}
