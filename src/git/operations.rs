use anyhow::Result;
use git2::{Status, StatusOptions};
use std::path::PathBuf;

use super::GitRepo;

impl GitRepo {
    /// Paths staged for commit, relative to the repository root.
    ///
    /// Deletions are excluded: hooks receive filenames they can read.
    pub fn staged_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut opts = StatusOptions::new();
        opts.include_ignored(false);
        opts.include_untracked(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        for entry in statuses.iter() {
            let staged = entry.status().intersects(
                Status::INDEX_NEW
                    | Status::INDEX_MODIFIED
                    | Status::INDEX_RENAMED
                    | Status::INDEX_TYPECHANGE,
            );
            if staged {
                if let Some(path) = entry.path() {
                    files.push(PathBuf::from(path));
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Every tracked path in the index, relative to the repository root.
    ///
    /// Used for `run --all-files`.
    pub fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let index = self.repo.index()?;
        let mut files: Vec<PathBuf> = index
            .iter()
            .filter_map(|entry| String::from_utf8(entry.path).ok())
            .map(PathBuf::from)
            .collect();

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo(dir: &TempDir) -> GitRepo {
        git2::Repository::init(dir.path()).unwrap();
        GitRepo::open(dir.path()).unwrap()
    }

    fn stage(repo: &GitRepo, name: &str, content: &str) {
        fs::write(repo.workdir().unwrap().join(name), content).unwrap();
        let mut index = repo.inner().index().unwrap();
        index.add_path(std::path::Path::new(name)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_staged_files_are_relative_and_sorted() {
        let dir = TempDir::new().unwrap();
        let repo = init_repo(&dir);
        stage(&repo, "b.rs", "fn main() {}");
        stage(&repo, "a.md", "# hi");

        let staged = repo.staged_files().unwrap();
        assert_eq!(staged, vec![PathBuf::from("a.md"), PathBuf::from("b.rs")]);
    }

    #[test]
    fn test_empty_repo_has_no_staged_files() {
        let dir = TempDir::new().unwrap();
        let repo = init_repo(&dir);
        assert!(repo.staged_files().unwrap().is_empty());
    }
}
