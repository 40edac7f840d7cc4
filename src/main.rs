use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use repodash::cli;
use repodash::errors::Result;
use repodash::suggestions::display_error_with_suggestions;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "RDASH_LOG";

#[derive(Parser)]
#[command(name = "rdash")]
#[command(about = "Dashboard for the git repositories on this machine", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find repositories below a folder and show their status
    Scan {
        /// Folder to scan (defaults to the previously scanned folder)
        path: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Forget the remembered folder
        #[arg(long)]
        forget: bool,
    },
    /// Show branch, changes and recent commits of one repository
    Info {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the diff of one file
    Diff { path: PathBuf, file: String },
    /// Show the commits that touched one file
    History {
        path: PathBuf,
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Run an action (fetch, pull, push, stage, unstage, commit, discard,
    /// open-folder, open-terminal)
    Run {
        path: PathBuf,
        action: String,
        /// Limit stage, unstage or discard to these files (repeatable)
        #[arg(short, long = "file")]
        files: Vec<String>,
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
        /// Don't ask before discarding changes
        #[arg(short, long)]
        yes: bool,
    },
    /// List the folders inside a directory
    Browse {
        path: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show configuration files and the effective settings
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("repodash=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Scan { path, json, forget } => cli::scan::run(path, json, forget),
        Commands::Info { path, json } => cli::info::run(&path, json),
        Commands::Diff { path, file } => cli::diff::run(&path, &file),
        Commands::History { path, file, json } => cli::history::run(&path, &file, json),
        Commands::Run {
            path,
            action,
            files,
            message,
            yes,
        } => cli::run::run(&path, &action, files, message, yes),
        Commands::Browse { path, json } => cli::browse::run(path, json),
        Commands::Config => cli::config_cmd::show(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rdash", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        display_error_with_suggestions(&e);
        exit(1);
    }
}
