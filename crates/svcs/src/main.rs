//! svcs - a minimal snapshot-based version control tool.
//!
//! This is the main entry point for the svcs CLI.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::*;
use std::path::PathBuf;
use svcs_snapshot::{SnapshotStore, StoreConfig};

#[derive(Parser)]
#[command(name = "svcs")]
#[command(version, about = "A minimal snapshot-based version control tool", long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Working directory (defaults to the current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Store directory, relative to the working directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print the command summary
    #[arg(short, long)]
    help: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username.
    Config {
        /// New username; several words are joined with spaces
        #[arg(num_args = 0.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Add a file to the index.
    Add {
        /// File to track
        path: Option<PathBuf>,
    },
    /// Show commit logs.
    Log,
    /// Save changes.
    Commit {
        /// Commit message; several words are joined with spaces
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Restore a file.
    Checkout {
        /// Commit hash
        id: Option<String>,
    },
    #[command(external_subcommand)]
    Other(Vec<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_level.as_deref());

    let command = match cli.command {
        Some(command) if !cli.help => command,
        _ => {
            print_help();
            return Ok(());
        }
    };

    // Unknown commands must not create a store as a side effect
    if let Commands::Other(args) = &command {
        print_unknown(args.first().map(String::as_str).unwrap_or_default());
        return Ok(());
    }

    let cwd = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut config = StoreConfig::default();
    if let Some(store_dir) = cli.store {
        config.store_dir = store_dir;
    }

    let mut store = SnapshotStore::open(&cwd, config)
        .await
        .with_context(|| format!("Failed to open snapshot store in {}", cwd.display()))?;

    match command {
        Commands::Config { name } => handle_config(&mut store, name).await,
        Commands::Add { path } => handle_add(&mut store, path).await,
        Commands::Log => {
            handle_log(&store);
            Ok(())
        }
        Commands::Commit { message } => handle_commit(&mut store, message).await,
        Commands::Checkout { id } => handle_checkout(&store, id).await,
        Commands::Other(_) => Ok(()),
    }
}
