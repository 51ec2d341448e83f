//! Command-line interface.
//!
//! Clap-based CLI with global flags and one module per subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

use commands::{install::InstallArgs, list::ListArgs, run::RunArgs};

/// hookrun - declarative pre-commit hook runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Policy file path (default: .hookrun.yaml / .pre-commit-config.yaml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the hooks for a lifecycle stage
    Run(RunArgs),
    /// Install hook scripts into .git/hooks
    Install(InstallArgs),
    /// Remove hookrun-owned hook scripts
    Uninstall,
    /// List the hooks the policy declares
    List(ListArgs),
    /// Load and validate the policy file
    Validate,
    /// Write a starter policy file
    Init {
        /// Overwrite an existing policy file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, self.config, &output).await,
            Commands::Install(args) => {
                commands::install::execute(args, self.config, &output).await
            }
            Commands::Uninstall => commands::uninstall::execute(&output).await,
            Commands::List(args) => commands::list::execute(args, self.config, &output).await,
            Commands::Validate => commands::validate::execute(self.config, &output).await,
            Commands::Init { force } => commands::init::execute(force, &output).await,
        }
    }
}
