//! Single-hook process execution.
//!
//! The entry is a shell command line; filenames are appended as positional
//! arguments through `sh -c '... "$@"'` so quoting inside the entry is
//! honored without re-parsing it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::HookStatus;
use crate::config::HookDescriptor;

/// Resolve the program a hook entry would execute, if it exists on PATH.
pub fn resolve_entry(entry: &str) -> Option<PathBuf> {
    let program = entry.split_whitespace().next()?;
    which::which(program).ok()
}

/// Invoke one hook once, in `workdir`, with the filtered filename list
/// appended when the hook takes filenames. Returns the exit status and
/// the combined stdout/stderr.
pub(super) fn run_hook(
    hook: &HookDescriptor,
    files: &[PathBuf],
    workdir: &Path,
) -> Result<(HookStatus, String)> {
    // `language: fail` hooks exist to block matched files outright.
    if hook.language.is_fail() {
        let listing = files
            .iter()
            .map(|f| f.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        return Ok((HookStatus::Failed(1), format!("{}\n{listing}", hook.entry)));
    }

    if resolve_entry(&hook.entry).is_none() {
        let program = hook.entry.split_whitespace().next().unwrap_or(&hook.entry);
        return Ok((
            HookStatus::Failed(127),
            format!("command not found: {program}"),
        ));
    }

    let mut cmdline = hook.entry.clone();
    for arg in &hook.args {
        cmdline.push(' ');
        cmdline.push_str(&shell_quote(arg));
    }

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(format!("{cmdline} \"$@\""))
        .arg(&hook.entry) // argv0 for the inline script
        .current_dir(workdir);

    if hook.pass_filenames {
        for file in files {
            cmd.arg(file);
        }
    }

    let result = cmd
        .output()
        .with_context(|| format!("Failed to spawn hook '{}'", hook.id))?;

    let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
    output.push_str(&String::from_utf8_lossy(&result.stderr));

    let status = if result.status.success() {
        HookStatus::Passed
    } else {
        HookStatus::Failed(result.status.code().unwrap_or(1))
    };

    Ok((status, output))
}

/// Quote one argument for inclusion in a `sh -c` command line.
fn shell_quote(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,".contains(c))
    {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}
