use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::load_policy;
use crate::cli::Output;
use crate::config::HookStage;
use crate::dispatch;
use crate::git::GitRepo;
use crate::store::HookStore;

#[derive(Args)]
pub struct RunArgs {
    /// Lifecycle stage to run hooks for
    #[arg(value_enum)]
    pub stage: HookStage,

    /// Run against every tracked file instead of the staged set
    #[arg(long)]
    pub all_files: bool,

    /// Explicit changed-file set (repeatable; overrides staged/tracked discovery)
    #[arg(long)]
    pub files: Vec<PathBuf>,

    /// Run a single hook by id
    #[arg(long)]
    pub hook: Option<String>,
}

pub async fn execute(args: RunArgs, config: Option<PathBuf>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let policy = load_policy(config, &repo)?;

    let changed_files = if !args.files.is_empty() {
        args.files
    } else if args.all_files {
        repo.tracked_files()?
    } else {
        repo.staged_files()?
    };

    output.verbose(&format!(
        "{} stage, {} candidate files",
        args.stage,
        changed_files.len()
    ));

    let store = HookStore::open()?;
    let hooks = dispatch::resolve_hooks(&policy, &store)?;
    let report = dispatch::run_hooks(
        &hooks,
        args.stage,
        &changed_files,
        repo.workdir()?,
        args.hook.as_deref(),
    )?;

    for outcome in &report.outcomes {
        output.hook_result(outcome);
    }

    if !report.success() {
        let failed: Vec<&str> = report.failed().map(|o| o.id.as_str()).collect();
        output.error(&format!("{} hook(s) failed: {}", failed.len(), failed.join(", ")));
        std::process::exit(1);
    }

    Ok(())
}
