use crate::api::ScanResponse;
use crate::cli::{print_json, resolve, status_label, Context};
use crate::errors::{DashError, Result};
use crate::scanner::Scanner;
use crate::state::StateStore;
use colored::*;
use std::path::PathBuf;

/// Scan a folder tree and print one line per repository
///
/// Without a path the folder of the previous scan is reused.
pub fn run(path: Option<PathBuf>, json: bool, forget: bool) -> Result<()> {
    let store = StateStore::open_default();

    if forget {
        if let Some(store) = &store {
            store.clear_last_root()?;
        }
        if path.is_none() {
            println!("{}", "✓ Forgot the last scanned folder".bright_green());
            return Ok(());
        }
    }

    let root = match path {
        Some(p) => resolve(&p)?,
        None => store
            .as_ref()
            .map(StateStore::last_root)
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                DashError::InvalidArgument(
                    "Path is required (no previously scanned folder)".to_string(),
                )
            })?,
    };

    let ctx = Context::load()?;
    let repos = Scanner::new(&ctx.factory, ctx.config.scan.clone()).scan(&root)?;

    if let Some(store) = &store {
        // Losing the preference is not worth failing the scan over
        if let Err(e) = store.set_last_root(&root) {
            tracing::warn!(error = %e, "could not remember scanned folder");
        }
    }

    if json {
        return print_json(&ScanResponse { repos });
    }

    if repos.is_empty() {
        println!("No repositories found under {}", root.display());
        return Ok(());
    }

    println!("{:<28} {:<24} {:<10} PATH", "NAME", "BRANCH", "STATUS");
    println!("{}", "-".repeat(80));
    for repo in &repos {
        println!(
            "{:<28} {:<24} {:<10} {}",
            repo.name.bold(),
            repo.branch,
            status_label(repo.status),
            repo.path.display().to_string().dimmed()
        );
    }
    println!("\n{} repositories", repos.len());

    Ok(())
}
