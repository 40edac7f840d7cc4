// Error suggestion system for better user experience
use crate::actions::FileResult;
use crate::errors::DashError;
use colored::Colorize;

/// Display an error with helpful suggestions
pub fn display_error_with_suggestions(error: &DashError) {
    eprintln!("\n{}: {}", "Error".bright_red().bold(), error);

    match error {
        DashError::NotARepository(path) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Check that {} contains a {} entry", path, ".git".bright_cyan());
            eprintln!(
                "  • Find repositories under a folder: {}",
                "rdash scan <folder>".bright_cyan()
            );
        }

        DashError::NotFound(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!("  • Check the path for typos");
            eprintln!(
                "  • Rescan to refresh the repository list: {}",
                "rdash scan".bright_cyan()
            );
        }

        DashError::InvalidArgument(reason) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            if reason.contains("Unknown action") {
                eprintln!(
                    "  • Valid actions: {}",
                    crate::actions::Action::ALL
                        .iter()
                        .map(|a| a.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                        .bright_cyan()
                );
            } else if reason.contains("Commit message") {
                eprintln!(
                    "  • Pass a message: {}",
                    "rdash run <path> commit -m \"message\"".bright_cyan()
                );
            } else {
                eprintln!("  • Run {} for usage", "rdash --help".bright_cyan());
            }
        }

        DashError::Tool { message, .. } => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            if message.contains("index.lock") {
                eprintln!("  • Another git process is using this repository; retry when it finishes");
            } else if message.contains("nothing to commit") {
                eprintln!("  • Stage changes first: {}", "rdash run <path> stage".bright_cyan());
            } else if message.contains("Could not read from remote")
                || message.contains("terminal prompts disabled")
            {
                eprintln!("  • Check your network connection and credentials for the remote");
            } else {
                eprintln!("  • Run the git command by hand in the repository for details");
            }
        }

        DashError::PartialFailure { outcomes, .. } => {
            eprintln!("\n{}:", "Per-file results".bright_yellow());
            for outcome in outcomes {
                match &outcome.result {
                    FileResult::Restored => {
                        eprintln!("  {} {} (restored)", "✓".green(), outcome.path)
                    }
                    FileResult::Removed => {
                        eprintln!("  {} {} (removed)", "✓".green(), outcome.path)
                    }
                    FileResult::Failed(msg) => {
                        eprintln!("  {} {}: {}", "✗".red(), outcome.path, msg)
                    }
                }
            }
        }

        DashError::ConfigError(_) => {
            eprintln!("\n{}:", "Suggestions".bright_yellow());
            eprintln!(
                "  • Show the effective configuration: {}",
                "rdash config".bright_cyan()
            );
        }

        _ => {}
    }
}
