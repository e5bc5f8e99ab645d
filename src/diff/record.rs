//! Per-file patch records and the finished result of one traversal.

use std::collections::HashMap;

use crate::diff::events::ChangeKind;
use crate::diff::stat;

/// Accumulated patch text and line counts for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchRecord {
  kind:      ChangeKind,
  patch:     String,
  additions: usize,
  deletions: usize
}

impl PatchRecord {
  pub(crate) fn new(kind: ChangeKind) -> Self {
    Self { kind, ..Default::default() }
  }

  pub(crate) fn push_header(&mut self, header: &str) {
    self.patch.push_str(header);
  }

  pub(crate) fn push_line(&mut self, origin: char, content: &str) {
    self.patch.push(origin);
    self.patch.push_str(content);

    match origin {
      '+' => self.additions += 1,
      '-' => self.deletions += 1,
      _ => {}
    }
  }

  pub fn kind(&self) -> ChangeKind {
    self.kind
  }

  pub fn patch(&self) -> &str {
    &self.patch
  }

  pub fn additions(&self) -> usize {
    self.additions
  }

  pub fn deletions(&self) -> usize {
    self.deletions
  }
}

/// Summed counters across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffTotals {
  pub files:      usize,
  pub insertions: usize,
  pub deletions:  usize
}

/// Result of one diff invocation.
///
/// Built by [`Aggregator`](crate::diff::Aggregator) during a single traversal
/// and read-only afterwards. Every path in `files` has a record and every
/// record has a path in `files`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffRun {
  pub(crate) files:      Vec<String>,
  pub(crate) records:    HashMap<String, PatchRecord>,
  pub(crate) full_patch: String
}

impl DiffRun {
  /// Changed paths in traversal order.
  pub fn list_changed_files(&self) -> &[String] {
    &self.files
  }

  /// Patch text for `path`, empty when nothing was recorded for it.
  pub fn patch_for(&self, path: &str) -> &str {
    self.record(path).map(PatchRecord::patch).unwrap_or_default()
  }

  pub fn record(&self, path: &str) -> Option<&PatchRecord> {
    self.records.get(path)
  }

  /// Records paired with their paths, in traversal order.
  pub fn records(&self) -> impl Iterator<Item = (&str, &PatchRecord)> + '_ {
    self
      .files
      .iter()
      .filter_map(|path| self.records.get(path).map(|record| (path.as_str(), record)))
  }

  /// Content lines of the whole diff as rendered, without headers.
  pub fn full_patch(&self) -> &str {
    &self.full_patch
  }

  pub fn totals(&self) -> DiffTotals {
    self
      .records()
      .fold(DiffTotals { files: self.files.len(), ..Default::default() }, |mut totals, (_, record)| {
        totals.insertions += record.additions;
        totals.deletions += record.deletions;
        totals
      })
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn diffstat(&self) -> String {
    stat::format(self)
  }
}
