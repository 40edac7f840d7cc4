// Detailed view of a single repository
use crate::api::DetailResponse;
use crate::cli::{print_json, resolve, status_label, Context};
use crate::detail::DetailService;
use crate::errors::{DashError, Result};
use crate::vcs::short_commit;
use colored::*;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> Result<()> {
    let repo = resolve(path)?;
    let ctx = Context::load()?;

    let details = DetailService::new(&ctx.factory, ctx.config.detail.clone())
        .detail(&repo)?
        .ok_or_else(|| DashError::NotFound(format!("Repository not found: {}", repo.display())))?;

    if json {
        return print_json(&DetailResponse { details });
    }

    let summary = &details.summary;
    println!("{}", "═".repeat(80));
    println!("{} {}", "Repository:".bright_cyan().bold(), summary.name.bold());
    println!("{}", "═".repeat(80));
    println!("  Path:   {}", summary.path.display());
    println!("  Branch: {}", summary.branch.bright_yellow());
    println!("  Status: {}", status_label(summary.status));
    if let Some(remote) = &summary.remote_url {
        println!("  Remote: {}", remote);
    }
    if let Some(web) = &details.web_url {
        println!("  Web:    {}", web.bright_blue().underline());
    }

    println!("\n{}", "Changes".bright_cyan().bold());
    if details.files.is_empty() {
        println!("  {}", "Working tree clean".dimmed());
    }
    for file in &details.files {
        let marker = if file.staged {
            format!("{:>2}", file.status).bright_green()
        } else {
            format!("{:>2}", file.status).bright_red()
        };
        let staged = if file.staged { " (staged)" } else { "" };
        println!("  {} {}{}", marker, file.path, staged.dimmed());
    }

    println!("\n{}", "Recent commits".bright_cyan().bold());
    if details.recent_commits.is_empty() {
        println!("  {}", "No commits yet".dimmed());
    }
    for commit in &details.recent_commits {
        println!(
            "  {} {} {}",
            short_commit(&commit.hash).bright_yellow(),
            commit.message,
            format!("({}, {})", commit.author_name, commit.date).dimmed()
        );
    }

    Ok(())
}
