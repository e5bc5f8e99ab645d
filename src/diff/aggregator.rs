//! Folds a diff event stream into a [`DiffRun`].

use std::collections::hash_map::Entry;

use crate::diff::events::{ChangeKind, DiffSource, DiffVisitor};
use crate::diff::record::{DiffRun, PatchRecord};
use crate::diff::renderer::PatchRenderer;
use crate::error::Result;
use crate::profile;

/// Where an aggregator is in its single traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
  #[default]
  Uninitialized,
  Traversing,
  Finalized
}

/// Per-run accumulator for file, hunk and line events.
///
/// Events are only accepted while [`Phase::Traversing`]. [`finish`](Self::finish)
/// consumes the aggregator and hands the run to the caller.
#[derive(Debug, Default)]
pub struct Aggregator {
  phase: Phase,
  run:   DiffRun
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Runs both traversals of `source` and returns the finished run.
  ///
  /// A failed traversal discards everything collected so far.
  pub fn collect(source: &dyn DiffSource) -> Result<DiffRun> {
    profile!("Aggregate diff");

    let mut aggregator = Self::new();
    aggregator.begin();
    source.for_each_delta(&mut aggregator)?;

    let mut renderer = PatchRenderer::new();
    source.render_patch(&mut renderer)?;

    let mut run = aggregator.finish();
    run.full_patch = renderer.into_patch();
    Ok(run)
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn begin(&mut self) {
    self.phase = Phase::Traversing;
  }

  pub fn finish(self) -> DiffRun {
    let totals = self.run.totals();
    log::debug!("Aggregated {} files (+{} -{})", totals.files, totals.insertions, totals.deletions);
    self.run
  }

  fn accepting(&self, event: &str) -> bool {
    if self.phase != Phase::Traversing {
      log::warn!("Ignoring {} event while {:?}", event, self.phase);
      return false;
    }
    true
  }

  /// Record for `path`, created on first touch.
  fn record_mut(&mut self, path: &str) -> &mut PatchRecord {
    if !self.run.records.contains_key(path) {
      log::warn!("Content for {} arrived before its file event", path);
      self.run.files.push(path.to_string());
    }

    self.run.records.entry(path.to_string()).or_default()
  }
}

impl DiffVisitor for Aggregator {
  fn on_file(&mut self, path: &str, kind: ChangeKind) {
    if !self.accepting("file") {
      return;
    }

    match self.run.records.entry(path.to_string()) {
      Entry::Occupied(mut entry) => {
        log::warn!("Duplicate file event for {}, resetting its patch", path);
        entry.insert(PatchRecord::new(kind));
      }
      Entry::Vacant(entry) => {
        log::debug!("[diff] File: {}", path);
        entry.insert(PatchRecord::new(kind));
        self.run.files.push(path.to_string());
      }
    }
  }

  fn on_hunk(&mut self, path: &str, header: &str) {
    if self.accepting("hunk") {
      self.record_mut(path).push_header(header);
    }
  }

  fn on_line(&mut self, path: &str, origin: char, content: &str) {
    if self.accepting("line") {
      self.record_mut(path).push_line(origin, content);
    }
  }
}
