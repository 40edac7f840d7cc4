use crate::api::HistoryResponse;
use crate::cli::{print_json, resolve, Context};
use crate::detail::DetailService;
use crate::errors::Result;
use crate::vcs::short_commit;
use colored::*;
use std::path::Path;

/// Print the commits that touched one file
pub fn run(path: &Path, file: &str, json: bool) -> Result<()> {
    let repo = resolve(path)?;
    let ctx = Context::load()?;
    let history =
        DetailService::new(&ctx.factory, ctx.config.detail.clone()).file_history(&repo, file)?;

    if json {
        return print_json(&HistoryResponse { history });
    }

    if history.is_empty() {
        println!("No history for {}", file);
        return Ok(());
    }

    println!("{:<9} {:<26} {:<20} MESSAGE", "COMMIT", "DATE", "AUTHOR");
    println!("{}", "-".repeat(80));
    for commit in &history {
        println!(
            "{:<9} {:<26} {:<20} {}",
            short_commit(&commit.hash).bright_yellow(),
            commit.date,
            commit.author_name,
            commit.message
        );
    }

    Ok(())
}
