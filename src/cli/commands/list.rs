use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::load_policy;
use crate::cli::Output;
use crate::git::GitRepo;

#[derive(Args)]
pub struct ListArgs {
    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub async fn execute(args: ListArgs, config: Option<PathBuf>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let policy = load_policy(config, &repo)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    for source in &policy.repos {
        match &source.rev {
            Some(rev) => output.header(&format!("{} @ {}", source.repo, rev)),
            None => output.header(&source.repo),
        }
        for hook in &source.hooks {
            let name = hook.name.as_deref().unwrap_or(&hook.id);
            let stages = if hook.stages.is_empty() {
                "all stages".to_string()
            } else {
                hook.stages
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            output.list_item(&format!("{} ({}) [{}]", hook.id, name, stages));
        }
    }

    Ok(())
}
