use crate::browse::list_directories;
use crate::cli::{print_json, resolve};
use crate::errors::Result;
use colored::*;
use std::path::PathBuf;

/// List the folders below `path` (home directory by default)
pub fn run(path: Option<PathBuf>, json: bool) -> Result<()> {
    let path = path.map(|p| resolve(&p)).transpose()?;
    let listing = list_directories(path.as_deref())?;

    if json {
        return print_json(&listing);
    }

    println!("{}", listing.path.display().to_string().bright_cyan().bold());
    if let Some(parent) = &listing.parent {
        println!("  {} {}", "..".dimmed(), parent.display().to_string().dimmed());
    }
    for dir in &listing.directories {
        println!("  {}/", dir.name);
    }

    Ok(())
}
