// Show the effective configuration
use crate::cli::Context;
use crate::config::{Config, GLOBAL_FILE, LOCAL_FILE, LOCAL_OVERRIDE_FILE};
use crate::errors::Result;
use colored::*;

pub fn show() -> Result<()> {
    let ctx = Context::load()?;

    println!("{}", "Configuration files (lowest precedence first):".bright_cyan());
    match Config::global_dir() {
        Some(dir) => print_source(&dir.join(GLOBAL_FILE)),
        None => println!("  {}", "(no global config directory)".dimmed()),
    }
    let current_dir = std::env::current_dir()?;
    print_source(&current_dir.join(LOCAL_FILE));
    print_source(&current_dir.join(LOCAL_OVERRIDE_FILE));

    println!("\n{}", "Effective configuration:".bright_cyan());
    print!("{}", ctx.config.to_yaml()?);

    Ok(())
}

fn print_source(path: &std::path::Path) {
    if path.exists() {
        println!("  {} {}", "✓".bright_green(), path.display());
    } else {
        println!("  {} {}", "-".dimmed(), path.display().to_string().dimmed());
    }
}
