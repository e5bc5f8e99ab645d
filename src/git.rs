//! Repository access: opening, revision lookup and tree diffs.

use std::path::Path;

use git2::{Commit, ObjectType, Repository, Tree, TreeWalkMode, TreeWalkResult};

use crate::config::DiffConfig;
use crate::diff::traits::path_key;
use crate::diff::{Aggregator, DiffRun};
use crate::error::{DiffError, Result};
use crate::profile;

/// A repository together with the options its diffs are computed with.
pub struct Repo {
  repo:   Repository,
  config: DiffConfig
}

impl Repo {
  /// Opens the repository containing `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let repo = Repository::discover(path).map_err(|source| DiffError::OpenRepository {
      path: path.display().to_string(),
      source
    })?;
    Ok(Self::from(repo))
  }

  /// Opens the repository named by `GIT_DIR` and friends.
  pub fn open_from_env() -> Result<Self> {
    let repo = Repository::open_from_env().map_err(|source| DiffError::OpenRepository {
      path: std::env::var("GIT_DIR").unwrap_or_else(|_| ".".to_string()),
      source
    })?;
    Ok(Self::from(repo))
  }

  pub fn with_config(mut self, config: DiffConfig) -> Self {
    self.config = config;
    self
  }

  pub fn config(&self) -> &DiffConfig {
    &self.config
  }

  pub fn repository(&self) -> &Repository {
    &self.repo
  }

  /// Resolves `rev` (branch, tag, sha, `HEAD~2`, ...) to a commit.
  pub fn commit(&self, rev: &str) -> Result<Commit<'_>> {
    self
      .repo
      .revparse_single(rev)
      .and_then(|object| object.peel_to_commit())
      .map_err(|source| DiffError::Revision { rev: rev.to_string(), source })
  }

  /// Tree-to-tree diff between two commits.
  pub fn diff_commits(&self, from: &Commit<'_>, to: &Commit<'_>) -> Result<DiffRun> {
    profile!("Commit diff");
    log::debug!("[diff] {} -> {}", from.id(), to.id());

    let from_tree = commit_tree(from)?;
    let to_tree = commit_tree(to)?;
    let mut opts = self.config.diff_options();

    // The diff handle is freed on drop, including when aggregation fails
    let diff = self
      .repo
      .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), Some(&mut opts))
      .map_err(DiffError::Diff)?;

    Aggregator::collect(&diff)
  }

  /// HEAD against the working directory, staged and unstaged changes alike.
  pub fn diff_workdir(&self) -> Result<DiffRun> {
    profile!("Working directory diff");

    let tree = self.head_tree()?;
    let mut opts = self.config.diff_options();

    let diff = self
      .repo
      .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))
      .map_err(DiffError::Diff)?;

    Aggregator::collect(&diff)
  }

  /// Every blob path under the tree of `rev`, in pre-order.
  pub fn tree_blob_paths(&self, rev: &str) -> Result<Vec<String>> {
    let commit = self.commit(rev)?;
    let tree = commit_tree(&commit)?;
    blob_paths(&tree)
  }

  /// HEAD's tree, or the empty tree while HEAD is unborn.
  fn head_tree(&self) -> Result<Tree<'_>> {
    match self.repo.head() {
      Ok(head) => Ok(head.peel_to_tree()?),
      Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
        log::debug!("HEAD is unborn, diffing against the empty tree");
        let oid = self.repo.treebuilder(None)?.write()?;
        Ok(self.repo.find_tree(oid)?)
      }
      Err(e) => Err(e.into())
    }
  }
}

impl From<Repository> for Repo {
  fn from(repo: Repository) -> Self {
    Self { repo, config: DiffConfig::default() }
  }
}

fn commit_tree<'r>(commit: &Commit<'r>) -> Result<Tree<'r>> {
  commit
    .tree()
    .map_err(|source| DiffError::Tree { commit: commit.id(), source })
}

fn blob_paths(tree: &Tree<'_>) -> Result<Vec<String>> {
  let mut paths = Vec::new();

  tree.walk(TreeWalkMode::PreOrder, |root, entry| {
    if entry.kind() == Some(ObjectType::Blob) {
      paths.push(format!("{}{}", root, path_key(entry.name_bytes())));
    }
    TreeWalkResult::Ok
  })?;

  Ok(paths)
}
