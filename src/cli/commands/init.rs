use anyhow::Result;

use crate::cli::Output;
use crate::config::{DEFAULT_POLICY, POLICY_FILE_NAMES};

pub async fn execute(force: bool, output: &Output) -> Result<()> {
    let path = std::path::Path::new(POLICY_FILE_NAMES[0]);

    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(path, DEFAULT_POLICY)?;
    output.success(&format!("wrote {}", path.display()));
    output.info("edit the policy, then run `hookrun install`");
    Ok(())
}
