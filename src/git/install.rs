//! Hook script installation under `.git/hooks/`.
//!
//! Installed scripts carry a marker line so hookrun only ever overwrites
//! or removes scripts it owns. Foreign hooks are preserved as
//! `<name>.legacy` and restored on uninstall.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::GitRepo;
use crate::config::HookStage;

/// Marker identifying a hook script as hookrun-managed.
pub const HOOK_MARKER: &str = "# hookrun managed hook - do not edit";

fn script_for(stage: HookStage) -> String {
    // commit-msg hooks receive the message file as their changed-file set.
    let args = match stage {
        HookStage::CommitMsg => " --files \"$1\"",
        _ => "",
    };
    format!(
        "#!/bin/sh\n{HOOK_MARKER}\nexec hookrun run {stage}{args}\n",
        stage = stage.as_str()
    )
}

/// Check whether a hook script at `path` is owned by hookrun.
pub fn is_hookrun_script(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(HOOK_MARKER))
        .unwrap_or(false)
}

/// Stages that currently have a hookrun-owned script installed.
pub fn installed_stages(repo: &GitRepo) -> Vec<HookStage> {
    HookStage::all()
        .iter()
        .copied()
        .filter(|stage| is_hookrun_script(&repo.hooks_dir().join(stage.as_str())))
        .collect()
}

impl GitRepo {
    /// Install the hook script for one stage.
    ///
    /// An existing foreign hook is moved aside to `<name>.legacy` unless
    /// `force` is set, in which case it is overwritten.
    pub fn install_hook(&self, stage: HookStage, force: bool) -> Result<()> {
        let hooks_dir = self.hooks_dir();
        fs::create_dir_all(&hooks_dir)
            .with_context(|| format!("Failed to create {}", hooks_dir.display()))?;

        let path = hooks_dir.join(stage.as_str());
        if path.exists() && !is_hookrun_script(&path) && !force {
            let legacy = hooks_dir.join(format!("{}.legacy", stage.as_str()));
            fs::rename(&path, &legacy).with_context(|| {
                format!("Failed to back up existing {} hook", stage.as_str())
            })?;
        }

        fs::write(&path, script_for(stage))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }

        Ok(())
    }

    /// Remove the hookrun-owned script for one stage, restoring any
    /// `.legacy` backup. Foreign scripts are left untouched.
    pub fn uninstall_hook(&self, stage: HookStage) -> Result<bool> {
        let hooks_dir = self.hooks_dir();
        let path = hooks_dir.join(stage.as_str());

        if !is_hookrun_script(&path) {
            return Ok(false);
        }

        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;

        let legacy = hooks_dir.join(format!("{}.legacy", stage.as_str()));
        if legacy.exists() {
            fs::rename(&legacy, &path)
                .with_context(|| format!("Failed to restore legacy {} hook", stage.as_str()))?;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo(dir: &TempDir) -> GitRepo {
        git2::Repository::init(dir.path()).unwrap();
        GitRepo::open(dir.path()).unwrap()
    }

    #[test]
    fn test_install_and_uninstall_round_trip() {
        let dir = TempDir::new().unwrap();
        let repo = init_repo(&dir);

        repo.install_hook(HookStage::PreCommit, false).unwrap();
        let path = repo.hooks_dir().join("pre-commit");
        assert!(is_hookrun_script(&path));
        assert_eq!(installed_stages(&repo), vec![HookStage::PreCommit]);

        assert!(repo.uninstall_hook(HookStage::PreCommit).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_foreign_hook_is_backed_up_and_restored() {
        let dir = TempDir::new().unwrap();
        let repo = init_repo(&dir);
        let hooks_dir = repo.hooks_dir();
        fs::create_dir_all(&hooks_dir).unwrap();

        let path = hooks_dir.join("pre-commit");
        fs::write(&path, "#!/bin/sh\necho mine\n").unwrap();

        repo.install_hook(HookStage::PreCommit, false).unwrap();
        assert!(is_hookrun_script(&path));
        assert!(hooks_dir.join("pre-commit.legacy").exists());

        repo.uninstall_hook(HookStage::PreCommit).unwrap();
        let restored = fs::read_to_string(&path).unwrap();
        assert!(restored.contains("echo mine"));
    }

    #[test]
    fn test_uninstall_leaves_foreign_hooks_alone() {
        let dir = TempDir::new().unwrap();
        let repo = init_repo(&dir);
        let hooks_dir = repo.hooks_dir();
        fs::create_dir_all(&hooks_dir).unwrap();

        let path = hooks_dir.join("pre-commit");
        fs::write(&path, "#!/bin/sh\necho mine\n").unwrap();

        assert!(!repo.uninstall_hook(HookStage::PreCommit).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_commit_msg_script_forwards_message_file() {
        let script = script_for(HookStage::CommitMsg);
        assert!(script.contains("run commit-msg --files \"$1\""));
        assert!(script.contains(HOOK_MARKER));
    }
}
