#![allow(dead_code)]

use std::path::Path;

use anyhow::{Context, Result};
use diffstat::Repo;
use tempfile::TempDir;

pub fn setup() {
  _ = env_logger::builder().is_test(true).try_init();
}

pub struct TestRepo {
  pub repo:      git2::Repository,
  pub repo_path: TempDir
}

impl Default for TestRepo {
  fn default() -> Self {
    let repo_path = TempDir::new().unwrap();
    let repo = git2::Repository::init(repo_path.path()).unwrap();

    Self { repo, repo_path }
  }
}

impl TestRepo {
  pub fn path(&self) -> &Path {
    self.repo_path.path()
  }

  /// A fresh handle on the same repository for the code under test.
  pub fn open(&self) -> Repo {
    Repo::open(self.path()).unwrap()
  }

  pub fn write(&self, name: &str, content: &str) -> Result<()> {
    let file_path = self.path().join(name);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content).with_context(|| format!("Could not write {}", name))
  }

  pub fn delete(&self, name: &str) -> Result<()> {
    std::fs::remove_file(self.path().join(name)).with_context(|| format!("Could not delete {}", name))
  }

  /// Stages `name`, or its removal when the file no longer exists.
  pub fn stage(&self, name: &str) -> Result<()> {
    let mut index = self.repo.index()?;

    if self.path().join(name).exists() {
      index.add_path(Path::new(name))?;
    } else {
      index.remove_path(Path::new(name))?;
    }

    index.write()?;
    Ok(())
  }

  /// Writes and stages every file, then commits.
  pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Result<git2::Oid> {
    for (name, content) in files {
      self.write(name, content)?;
      self.stage(name)?;
    }
    self.commit(message)
  }

  pub fn commit(&self, message: &str) -> Result<git2::Oid> {
    let mut index = self.repo.index()?;
    let oid = index.write_tree()?;
    let signature = git2::Signature::now("Your Name", "email@example.com")?;
    let tree = self.repo.find_tree(oid)?;

    let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents = parent.iter().collect::<Vec<&git2::Commit>>();

    self
      .repo
      .commit(Some("HEAD"), &signature, &signature, message, &tree, parents.as_slice())
      .context("Could not commit")
  }
}
