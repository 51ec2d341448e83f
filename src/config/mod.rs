//! Hook execution policy: the typed model and its loader.
//!
//! The policy is a single YAML document listing hook sources. A source is
//! either a remote repository pinned to one revision (hooks referenced by
//! id, defined in that repository's own manifest) or `repo: local` with
//! fully inline hook definitions. The policy is loaded once per run and
//! never mutated.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Embed the default policy at compile time, written out by `hookrun init`.
pub const DEFAULT_POLICY: &str = include_str!("../../default-policy.yaml");

/// Repository location literal marking an inline (local) source.
pub const LOCAL_REPO: &str = "local";

/// Policy file names searched for, in priority order.
pub const POLICY_FILE_NAMES: &[&str] = &[".hookrun.yaml", ".pre-commit-config.yaml"];

/// Errors from loading or validating a policy document.
///
/// `Parse` means the document is not well-formed YAML (or does not map onto
/// the schema at all); `Schema` means it parsed but violates a structural
/// requirement such as a missing pinned revision.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed policy document: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("policy schema violation: {0}")]
    Schema(String),
}

/// Git lifecycle events hooks can be installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HookStage {
    PreCommit,
    CommitMsg,
    PrePush,
    PostCheckout,
}

impl HookStage {
    /// The git hook name, as spelled under `.git/hooks/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStage::PreCommit => "pre-commit",
            HookStage::CommitMsg => "commit-msg",
            HookStage::PrePush => "pre-push",
            HookStage::PostCheckout => "post-checkout",
        }
    }

    pub fn all() -> &'static [HookStage] {
        &[
            HookStage::PreCommit,
            HookStage::CommitMsg,
            HookStage::PrePush,
            HookStage::PostCheckout,
        ]
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution environment tag for a hook entry.
///
/// Kept open rather than a closed enum: remote manifests use the full
/// pre-commit language set, and every entry executes as a system command
/// here regardless. Only `fail` carries distinct semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// A `fail` hook blocks matched files outright instead of running.
    pub fn is_fail(&self) -> bool {
        self.0 == "fail"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Language("system".to_string())
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Language(tag.to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level hook execution policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Lifecycle events `install` writes hook scripts for.
    #[serde(default = "default_install_hook_types")]
    pub default_install_hook_types: Vec<HookStage>,

    /// Hook sources, in dispatch order.
    pub repos: Vec<RepoSource>,
}

fn default_install_hook_types() -> Vec<HookStage> {
    vec![HookStage::PreCommit]
}

/// One hook source: a remote repository or the `local` pseudo-repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSource {
    /// Location URI, or `"local"` for inline definitions.
    pub repo: String,

    /// Pinned revision. Required for remote sources, forbidden for local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Hooks drawn from this source, in dispatch order.
    pub hooks: Vec<HookConfig>,
}

impl RepoSource {
    pub fn is_local(&self) -> bool {
        self.repo == LOCAL_REPO
    }
}

/// A single hook as written in the policy document.
///
/// For local sources `name` and `entry` are required; for remote sources
/// only `id` is, and the remaining fields override the manifest defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HookConfig {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// File type tags; a file matches when it carries all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// Filename regex; a file matches when the regex finds a match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Filename regex excluding otherwise-matched files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Extra arguments appended to the entry before any filenames.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Pass the matched filename list on invocation (default true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_filenames: Option<bool>,

    /// Run even when the filtered file set is empty.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub always_run: bool,

    /// Stages this hook applies to; empty means every stage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<HookStage>,
}

impl HookConfig {
    /// Overlay this config's explicit fields onto manifest defaults.
    pub fn overlaid_on(&self, base: &HookConfig) -> HookConfig {
        HookConfig {
            id: self.id.clone(),
            name: self.name.clone().or_else(|| base.name.clone()),
            entry: self.entry.clone().or_else(|| base.entry.clone()),
            language: self.language.clone().or_else(|| base.language.clone()),
            types: if self.types.is_empty() {
                base.types.clone()
            } else {
                self.types.clone()
            },
            files: self.files.clone().or_else(|| base.files.clone()),
            exclude: self.exclude.clone().or_else(|| base.exclude.clone()),
            args: if self.args.is_empty() {
                base.args.clone()
            } else {
                self.args.clone()
            },
            pass_filenames: self.pass_filenames.or(base.pass_filenames),
            always_run: self.always_run || base.always_run,
            stages: if self.stages.is_empty() {
                base.stages.clone()
            } else {
                self.stages.clone()
            },
        }
    }

    /// Materialize into a runnable descriptor. Fails with a schema error
    /// when `name` or `entry` is still missing after any manifest overlay.
    pub fn into_descriptor(self, source: &str) -> Result<HookDescriptor, PolicyError> {
        let name = self
            .name
            .ok_or_else(|| PolicyError::Schema(format!("hook '{}' is missing 'name'", self.id)))?;
        let entry = self
            .entry
            .ok_or_else(|| PolicyError::Schema(format!("hook '{}' is missing 'entry'", self.id)))?;

        Ok(HookDescriptor {
            id: self.id,
            name,
            entry,
            language: self.language.unwrap_or_default(),
            types: self.types,
            files: self.files,
            exclude: self.exclude,
            args: self.args,
            pass_filenames: self.pass_filenames.unwrap_or(true),
            always_run: self.always_run,
            stages: self.stages,
            source: source.to_string(),
        })
    }
}

/// A fully resolved, runnable hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookDescriptor {
    pub id: String,
    pub name: String,
    pub entry: String,
    pub language: Language,
    pub types: Vec<String>,
    pub files: Option<String>,
    pub exclude: Option<String>,
    pub args: Vec<String>,
    pub pass_filenames: bool,
    pub always_run: bool,
    /// Empty means the hook applies to every stage.
    pub stages: Vec<HookStage>,
    /// Originating repo URI, or `"local"`.
    pub source: String,
}

impl HookDescriptor {
    pub fn applies_to(&self, stage: HookStage) -> bool {
        self.stages.is_empty() || self.stages.contains(&stage)
    }
}

impl Policy {
    /// Parse and validate a policy document.
    pub fn from_yaml(content: &str) -> Result<Self, PolicyError> {
        let policy: Policy = serde_yml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy file.
    pub fn load_from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Find a policy file at `root`, by priority order of known names.
    pub fn find_policy_file(root: &Path) -> Option<PathBuf> {
        POLICY_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|p| p.exists())
    }

    /// Validate structural invariants the schema alone cannot express.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for source in &self.repos {
            if source.repo.is_empty() {
                return Err(PolicyError::Schema("source with empty 'repo'".into()));
            }

            if source.is_local() {
                if source.rev.is_some() {
                    return Err(PolicyError::Schema(
                        "local source must not pin a 'rev'".into(),
                    ));
                }
                for hook in &source.hooks {
                    if hook.entry.is_none() {
                        return Err(PolicyError::Schema(format!(
                            "local hook '{}' is missing 'entry'",
                            hook.id
                        )));
                    }
                    if hook.name.is_none() {
                        return Err(PolicyError::Schema(format!(
                            "local hook '{}' is missing 'name'",
                            hook.id
                        )));
                    }
                }
            } else if source.rev.is_none() {
                return Err(PolicyError::Schema(format!(
                    "remote source '{}' is missing a pinned 'rev'",
                    source.repo
                )));
            }

            let mut seen = HashSet::new();
            for hook in &source.hooks {
                if hook.id.is_empty() {
                    return Err(PolicyError::Schema(format!(
                        "source '{}' contains a hook without an 'id'",
                        source.repo
                    )));
                }
                if !seen.insert(hook.id.as_str()) {
                    return Err(PolicyError::Schema(format!(
                        "duplicate hook id '{}' in source '{}'",
                        hook.id, source.repo
                    )));
                }
                for (field, pattern) in [("files", &hook.files), ("exclude", &hook.exclude)] {
                    if let Some(pattern) = pattern {
                        Regex::new(pattern).map_err(|e| {
                            PolicyError::Schema(format!(
                                "hook '{}' has an invalid '{}' regex: {}",
                                hook.id, field, e
                            ))
                        })?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Descriptors for every local hook, in dispatch order.
    pub fn local_descriptors(&self) -> Result<Vec<HookDescriptor>, PolicyError> {
        self.repos
            .iter()
            .filter(|s| s.is_local())
            .flat_map(|s| s.hooks.iter().cloned())
            .map(|h| h.into_descriptor(LOCAL_REPO))
            .collect()
    }

    /// Serialize back to YAML. Defaulted fields are omitted; the result is
    /// semantically equivalent to the input document.
    pub fn to_yaml(&self) -> Result<String, PolicyError> {
        Ok(serde_yml::to_string(self)?)
    }
}
