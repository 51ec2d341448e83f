//! Hook dispatch: selection, sequential execution, result aggregation.
//!
//! For a triggering stage and a changed-file set, the dispatcher keeps the
//! hooks declared for that stage, narrows the file set per hook by type
//! tags and filename regexes, and invokes each hook as an external process
//! in listed order. A failing hook never aborts the remaining hooks; the
//! aggregate succeeds only if none failed.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::config::{HookDescriptor, HookStage, Policy, LOCAL_REPO};
use crate::store::HookStore;

mod exec;
mod filter;

pub use exec::resolve_entry;
pub use filter::filter_files;

/// Result of one hook invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HookStatus {
    Passed,
    /// Non-zero exit with the code (or 1 when terminated by signal).
    Failed(i32),
    /// No files matched and the hook is not `always_run`.
    Skipped,
}

/// Per-hook outcome with captured output and wall-clock duration.
#[derive(Debug)]
pub struct HookOutcome {
    pub id: String,
    pub name: String,
    pub status: HookStatus,
    pub duration: Duration,
    pub output: String,
}

/// Aggregate result of a dispatch run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<HookOutcome>,
}

impl RunReport {
    /// True when no hook failed (skipped hooks count as success).
    pub fn success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| !matches!(o.status, HookStatus::Failed(_)))
    }

    pub fn failed(&self) -> impl Iterator<Item = &HookOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, HookStatus::Failed(_)))
    }
}

/// Resolve every hook in the policy to a runnable descriptor, in listed
/// order. Remote sources go through the store; local sources are inline.
pub fn resolve_hooks(policy: &Policy, store: &HookStore) -> Result<Vec<HookDescriptor>> {
    let mut hooks = Vec::new();
    for source in &policy.repos {
        if source.is_local() {
            hooks.extend(policy_local(source)?);
        } else {
            hooks.extend(store.resolve(source)?);
        }
    }
    Ok(hooks)
}

fn policy_local(source: &crate::config::RepoSource) -> Result<Vec<HookDescriptor>> {
    source
        .hooks
        .iter()
        .cloned()
        .map(|h| h.into_descriptor(LOCAL_REPO).map_err(Into::into))
        .collect()
}

/// Select the hooks applicable to a stage, preserving listed order.
pub fn select_for_stage(hooks: &[HookDescriptor], stage: HookStage) -> Vec<&HookDescriptor> {
    hooks.iter().filter(|h| h.applies_to(stage)).collect()
}

/// Run all applicable hooks against a changed-file set.
///
/// `only` restricts the run to a single hook id (`run --hook <id>`).
pub fn run_hooks(
    hooks: &[HookDescriptor],
    stage: HookStage,
    changed_files: &[PathBuf],
    workdir: &Path,
    only: Option<&str>,
) -> Result<RunReport> {
    let selected = select_for_stage(hooks, stage);

    if let Some(only) = only {
        if !selected.iter().any(|h| h.id == only) {
            anyhow::bail!("no hook with id '{only}' for stage {stage}");
        }
    }

    let mut report = RunReport::default();

    for hook in selected {
        if let Some(only) = only {
            if hook.id != only {
                continue;
            }
        }

        let files = filter_files(hook, changed_files)?;
        debug!(hook = %hook.id, matched = files.len(), "dispatching hook");

        let start = std::time::Instant::now();
        let outcome = if files.is_empty() && !hook.always_run {
            HookOutcome {
                id: hook.id.clone(),
                name: hook.name.clone(),
                status: HookStatus::Skipped,
                duration: start.elapsed(),
                output: String::new(),
            }
        } else {
            let (status, output) = exec::run_hook(hook, &files, workdir)?;
            HookOutcome {
                id: hook.id.clone(),
                name: hook.name.clone(),
                status,
                duration: start.elapsed(),
                output,
            }
        };

        report.outcomes.push(outcome);
    }

    Ok(report)
}
