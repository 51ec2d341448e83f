use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::load_policy;
use crate::cli::Output;
use crate::config::HookStage;
use crate::git::GitRepo;

#[derive(Args)]
pub struct InstallArgs {
    /// Lifecycle stages to install for (default: policy's install types)
    #[arg(long = "hook-type", value_enum, value_delimiter = ',')]
    pub hook_types: Vec<HookStage>,

    /// Overwrite existing foreign hooks instead of backing them up
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InstallArgs, config: Option<PathBuf>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let policy = load_policy(config, &repo)?;

    let stages = if args.hook_types.is_empty() {
        policy.default_install_hook_types.clone()
    } else {
        args.hook_types
    };

    for stage in &stages {
        repo.install_hook(*stage, args.force)?;
        output.success(&format!("installed {} hook", stage));
    }

    Ok(())
}
