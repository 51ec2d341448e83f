//! Per-hook narrowing of the changed-file set.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::PathBuf;

use crate::config::HookDescriptor;
use crate::shared::filetypes::path_matches_types;

/// Narrow a changed-file set to the files a hook applies to: every
/// declared type tag must be carried, the `files` regex (if any) must
/// match, and the `exclude` regex (if any) must not.
pub fn filter_files(hook: &HookDescriptor, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let include = compile(&hook.files, &hook.id, "files")?;
    let exclude = compile(&hook.exclude, &hook.id, "exclude")?;

    let matched = files
        .iter()
        .filter(|path| {
            let name = path.to_string_lossy();
            path_matches_types(path, &hook.types)
                && include.as_ref().is_none_or(|re| re.is_match(&name))
                && !exclude.as_ref().is_some_and(|re| re.is_match(&name))
        })
        .cloned()
        .collect();

    Ok(matched)
}

fn compile(pattern: &Option<String>, id: &str, field: &str) -> Result<Option<Regex>> {
    pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .with_context(|| format!("hook '{id}' has an invalid '{field}' regex"))
}
