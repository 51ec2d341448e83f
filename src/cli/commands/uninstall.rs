use anyhow::Result;

use crate::cli::Output;
use crate::config::HookStage;
use crate::git::GitRepo;

pub async fn execute(output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;

    let mut removed = 0;
    for stage in HookStage::all() {
        if repo.uninstall_hook(*stage)? {
            output.success(&format!("removed {} hook", stage));
            removed += 1;
        }
    }

    if removed == 0 {
        output.info("no hookrun-owned hooks installed");
    }

    Ok(())
}
