//! Diff aggregation over git2 diffs.
//!
//! This module folds the event stream of a tree diff into per-file patch
//! records, renders the full patch text and formats diffstats.

pub mod aggregator;
pub mod events;
pub mod record;
pub mod renderer;
pub mod stat;
pub mod traits;

use git2::Commit;

use crate::error::Result;
use crate::git::Repo;

pub use aggregator::{Aggregator, Phase};
pub use events::{ChangeKind, DiffEvent, DiffSource, DiffVisitor, EventLog, LineSink};
pub use record::{DiffRun, DiffTotals, PatchRecord};
pub use renderer::PatchRenderer;
pub use traits::{path_key, DiffDeltaPath, Utf8String};

/// A diff as seen by its caller.
///
/// Starts out uninitialized; every query then answers with empty results.
/// Once a diff has been computed the run is finalized and read-only.
#[derive(Debug, Clone, Default)]
pub struct GitDiff {
  run: Option<DiffRun>
}

impl GitDiff {
  pub fn new() -> Self {
    Self::default()
  }

  /// Diffs the tree of `from` against the tree of `to`.
  pub fn between(repo: &Repo, from: &Commit<'_>, to: &Commit<'_>) -> Result<Self> {
    Ok(Self { run: Some(repo.diff_commits(from, to)?) })
  }

  /// Diffs HEAD against the working directory and reports whether anything
  /// is uncommitted. The run replaces whatever this diff held before; on
  /// failure the diff is left uninitialized.
  pub fn diff_working_directory(&mut self, repo: &Repo) -> Result<bool> {
    self.run = None;
    let run = repo.diff_workdir()?;
    let dirty = !run.is_empty();
    self.run = Some(run);
    Ok(dirty)
  }

  pub fn phase(&self) -> Phase {
    match self.run {
      Some(_) => Phase::Finalized,
      None => Phase::Uninitialized
    }
  }

  pub fn run(&self) -> Option<&DiffRun> {
    self.run.as_ref()
  }

  pub fn into_run(self) -> Option<DiffRun> {
    self.run
  }

  pub fn list_changed_files(&self) -> &[String] {
    self.run.as_ref().map(DiffRun::list_changed_files).unwrap_or_default()
  }

  pub fn patch_for(&self, path: &str) -> &str {
    self.run.as_ref().map(|run| run.patch_for(path)).unwrap_or_default()
  }

  pub fn full_patch(&self) -> &str {
    self.run.as_ref().map(DiffRun::full_patch).unwrap_or_default()
  }

  pub fn diffstat(&self) -> String {
    stat::format_optional(self.run.as_ref())
  }
}

impl From<DiffRun> for GitDiff {
  fn from(run: DiffRun) -> Self {
    Self { run: Some(run) }
  }
}
