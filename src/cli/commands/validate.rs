use anyhow::Result;
use std::path::PathBuf;

use super::load_policy;
use crate::cli::Output;
use crate::dispatch::resolve_entry;
use crate::git::GitRepo;

pub async fn execute(config: Option<PathBuf>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let policy = load_policy(config, &repo)?;

    let sources = policy.repos.len();
    let hooks: usize = policy.repos.iter().map(|s| s.hooks.len()).sum();

    // Warn (non-fatal) about local entries that won't resolve here.
    for hook in policy.local_descriptors()? {
        if resolve_entry(&hook.entry).is_none() {
            output.warning(&format!(
                "local hook '{}' entry '{}' is not on PATH",
                hook.id, hook.entry
            ));
        }
    }

    output.success(&format!(
        "policy is valid: {sources} source(s), {hooks} hook(s)"
    ));

    let installed = crate::git::installed_stages(&repo);
    if installed.is_empty() {
        output.info("no hook scripts installed yet (run `hookrun install`)");
    } else {
        let stages: Vec<&str> = installed.iter().map(|s| s.as_str()).collect();
        output.info(&format!("installed stages: {}", stages.join(", ")));
    }

    Ok(())
}
