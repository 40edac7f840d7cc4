// Run a repository action from the command line
use crate::actions::{Action, ActionArgs, Dispatcher, FileResult};
use crate::cli::{resolve, Context};
use crate::errors::{DashError, Result};
use crate::launcher::SystemLauncher;
use colored::*;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::Path;

pub fn run(
    path: &Path,
    action: &str,
    files: Vec<String>,
    message: Option<String>,
    yes: bool,
) -> Result<()> {
    let repo = resolve(path)?;
    let parsed: Action = action.parse()?;

    let args = ActionArgs {
        files: if files.is_empty() { None } else { Some(files) },
        message,
    };

    if parsed.is_destructive() && !yes && !confirm(parsed, &repo, &args)? {
        println!("{}", "Cancelled".bright_yellow());
        return Ok(());
    }

    let ctx = Context::load()?;
    let launcher = SystemLauncher;
    let outcome = Dispatcher::new(&ctx.factory, &launcher).run(&repo, parsed, &args)?;

    for file in &outcome.files {
        let what = match &file.result {
            FileResult::Restored => "restored",
            FileResult::Removed => "removed",
            FileResult::Failed(_) => continue,
        };
        println!("  {} {} ({})", "✓".bright_green(), file.path, what);
    }
    println!(
        "{} {} {}",
        "✓".bright_green(),
        outcome.action.to_string().bold(),
        "completed".bright_green()
    );

    Ok(())
}

fn confirm(action: Action, repo: &Path, args: &ActionArgs) -> Result<bool> {
    let refuse = || {
        DashError::InvalidArgument(format!(
            "Confirmation required to {}; pass --yes to skip the prompt",
            action
        ))
    };
    if !std::io::stdin().is_terminal() {
        return Err(refuse());
    }

    let count = args.files.as_ref().map_or(0, Vec::len);
    let prompt = format!(
        "{} {} file(s) in {}? Uncommitted changes will be lost",
        action,
        count,
        repo.display()
    );

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| {
            tracing::debug!(error = %e, "confirmation prompt unavailable");
            refuse()
        })
}
