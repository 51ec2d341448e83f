//! Git integration layer.
//!
//! Thin wrapper over git2 for repository discovery, changed-file listing,
//! and hook script management under `.git/hooks/`.

use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

mod install;
mod operations;

pub use install::{installed_stages, is_hookrun_script, HOOK_MARKER};

/// Handle to the repository hookrun operates on.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a repository at an explicit path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;
        Ok(Self { repo })
    }

    /// Discover the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").context("No git repository found")?;
        Ok(Self { repo })
    }

    /// The repository's working directory (hook processes run here).
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .context("Repository has no working directory")
    }

    /// The `.git/hooks` directory.
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo.path().join("hooks")
    }

    pub(crate) fn inner(&self) -> &Repository {
        &self.repo
    }
}
