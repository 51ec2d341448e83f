//! Subcommand implementations.

pub mod init;
pub mod install;
pub mod list;
pub mod run;
pub mod uninstall;
pub mod validate;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Policy;
use crate::git::GitRepo;

/// Load the policy: explicit `--config` path, or the first known policy
/// file name at the repository root. Policy errors are fatal to the run.
pub(crate) fn load_policy(config: Option<PathBuf>, repo: &GitRepo) -> Result<Policy> {
    let path = match config {
        Some(path) => path,
        None => Policy::find_policy_file(repo.workdir()?).ok_or_else(|| {
            anyhow::anyhow!(
                "no policy file found (expected one of: {})",
                crate::config::POLICY_FILE_NAMES.join(", ")
            )
        })?,
    };
    Ok(Policy::load_from_file(&path)?)
}
