//! Remote hook source resolution.
//!
//! A remote source names hooks by id only; their definitions live in the
//! source repository's own manifest (`.pre-commit-hooks.yaml`). The store
//! clones each (repo, rev) pair once into a cache directory, reads the
//! manifest, and materializes full descriptors for the requested ids.
//! A pinned revision is immutable, so cache entries are reused as-is.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{HookConfig, HookDescriptor, PolicyError, RepoSource};

/// Manifest file name inside a remote hook repository.
pub const MANIFEST_FILE: &str = ".pre-commit-hooks.yaml";

// Written under `.git/` once clone + checkout finished, so an interrupted
// clone is distinguishable from a complete one (with or without manifest).
const CLONE_SENTINEL: &str = "hookrun-complete";

/// Environment variable overriding the cache root.
pub const CACHE_ENV: &str = "HOOKRUN_CACHE";

/// Cache of cloned remote hook repositories.
pub struct HookStore {
    root: PathBuf,
}

impl HookStore {
    /// Open the default store (`$HOOKRUN_CACHE` or `~/.cache/hookrun`).
    pub fn open() -> Result<Self> {
        let root = match std::env::var_os(CACHE_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = std::env::var_os("HOME").context("HOME is not set")?;
                PathBuf::from(home).join(".cache").join("hookrun")
            }
        };
        Ok(Self::with_root(root))
    }

    /// Open a store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn repo_dir(&self, repo: &str, rev: &str) -> PathBuf {
        let digest = Sha256::digest(format!("{repo}@{rev}"));
        self.root.join("repos").join(format!("{digest:x}"))
    }

    /// Ensure a (repo, rev) pair is present in the cache; returns its path.
    pub fn ensure_cloned(&self, repo: &str, rev: &str) -> Result<PathBuf> {
        let dir = self.repo_dir(repo, rev);
        if dir.join(".git").join(CLONE_SENTINEL).exists() {
            debug!(repo, rev, "hook repository already cached");
            return Ok(dir);
        }

        if dir.exists() {
            // Interrupted clone; start over.
            std::fs::remove_dir_all(&dir)?;
        }
        std::fs::create_dir_all(
            dir.parent().context("cache directory has no parent")?,
        )?;

        debug!(repo, rev, "cloning hook repository");
        let cloned = git2::Repository::clone(repo, &dir)
            .with_context(|| format!("Failed to clone hook repository {repo}"))?;

        let object = cloned
            .revparse_single(rev)
            .with_context(|| format!("Revision '{rev}' not found in {repo}"))?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();
        cloned
            .checkout_tree(&object, Some(&mut checkout))
            .with_context(|| format!("Failed to check out '{rev}' in {repo}"))?;
        cloned.set_head_detached(object.id())?;

        std::fs::write(dir.join(".git").join(CLONE_SENTINEL), object.id().to_string())?;

        Ok(dir)
    }

    /// Parse the hook manifest of a cached repository.
    pub fn load_manifest(dir: &Path) -> Result<Vec<HookConfig>, PolicyError> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| PolicyError::Io {
            path,
            source,
        })?;
        Ok(serde_yml::from_str(&content)?)
    }

    /// Resolve every hook a remote source requests into a full descriptor.
    ///
    /// Config-side fields override manifest defaults. Requesting an id the
    /// manifest does not define is a schema error.
    pub fn resolve(&self, source: &RepoSource) -> Result<Vec<HookDescriptor>> {
        let rev = source
            .rev
            .as_deref()
            .context("remote source has no pinned revision")?;
        let dir = self.ensure_cloned(&source.repo, rev)?;
        let manifest = Self::load_manifest(&dir)?;

        let mut hooks = Vec::with_capacity(source.hooks.len());
        for request in &source.hooks {
            let base = manifest
                .iter()
                .find(|m| m.id == request.id)
                .ok_or_else(|| {
                    PolicyError::Schema(format!(
                        "hook '{}' is not defined by {}",
                        request.id, source.repo
                    ))
                })?;
            hooks.push(request.overlaid_on(base).into_descriptor(&source.repo)?);
        }

        Ok(hooks)
    }
}
