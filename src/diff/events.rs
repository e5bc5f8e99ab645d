//! Typed event delivery between a tree differ and its consumers.
//!
//! A differ walks a diff once and reports, per file, a file-changed
//! notification followed by hunk headers and content lines. Consumers
//! implement [`DiffVisitor`] for that stream and [`LineSink`] for the raw
//! patch rendering. [`DiffSource`] is implemented for `git2::Diff` and for
//! [`EventLog`], a recorded traversal that can be replayed.

use git2::{Diff, DiffFormat, DiffLineType};
use parking_lot::Mutex;

use crate::diff::traits::{DiffDeltaPath, Utf8String};
use crate::error::{DiffError, Result};
use crate::profile;

/// Kind of file-level change reported with a file-changed event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChangeKind {
  Added,
  Deleted,
  #[default]
  Modified,
  Renamed,
  Copied,
  Typechange,
  Untracked,
  Other
}

impl From<git2::Delta> for ChangeKind {
  fn from(delta: git2::Delta) -> Self {
    match delta {
      git2::Delta::Added => ChangeKind::Added,
      git2::Delta::Deleted => ChangeKind::Deleted,
      git2::Delta::Modified => ChangeKind::Modified,
      git2::Delta::Renamed => ChangeKind::Renamed,
      git2::Delta::Copied => ChangeKind::Copied,
      git2::Delta::Typechange => ChangeKind::Typechange,
      git2::Delta::Untracked => ChangeKind::Untracked,
      _ => ChangeKind::Other
    }
  }
}

impl ChangeKind {
  pub fn as_char(&self) -> char {
    match self {
      ChangeKind::Added => 'A',
      ChangeKind::Deleted => 'D',
      ChangeKind::Modified => 'M',
      ChangeKind::Renamed => 'R',
      ChangeKind::Copied => 'C',
      ChangeKind::Typechange => 'T',
      ChangeKind::Untracked => '?',
      ChangeKind::Other => ' '
    }
  }
}

/// Handlers for one traversal, called in emission order.
pub trait DiffVisitor {
  fn on_file(&mut self, path: &str, kind: ChangeKind);
  fn on_hunk(&mut self, path: &str, header: &str);
  fn on_line(&mut self, path: &str, origin: char, content: &str);
}

/// Receives the raw line stream of a patch rendering.
pub trait LineSink {
  fn on_line(&mut self, origin: char, content: &str);
}

/// Anything that can be walked as a diff.
pub trait DiffSource {
  /// Per-file traversal: file, hunk and line events.
  fn for_each_delta(&self, visitor: &mut dyn DiffVisitor) -> Result<()>;

  /// Content lines of the rendered patch, headers excluded.
  fn render_patch(&self, sink: &mut dyn LineSink) -> Result<()>;
}

/// Origins git2 reports for lines that carry file content.
fn is_content_line(origin: DiffLineType) -> bool {
  matches!(
    origin,
    DiffLineType::Context |
      DiffLineType::Addition |
      DiffLineType::Deletion |
      DiffLineType::ContextEOFNL |
      DiffLineType::AddEOFNL |
      DiffLineType::DeleteEOFNL
  )
}

impl DiffSource for Diff<'_> {
  fn for_each_delta(&self, visitor: &mut dyn DiffVisitor) -> Result<()> {
    profile!("Diff delta traversal");

    // foreach takes three independent closures; they take turns on the visitor
    let visitor = Mutex::new(visitor);

    self
      .foreach(
        &mut |delta, _progress| {
          visitor.lock().on_file(&delta.path(), delta.kind());
          true
        },
        None,
        Some(&mut |delta, hunk| {
          visitor.lock().on_hunk(&delta.path(), &hunk.header().to_utf8());
          true
        }),
        Some(&mut |delta, _hunk, line| {
          visitor
            .lock()
            .on_line(&delta.path(), line.origin(), &line.content().to_utf8());
          true
        })
      )
      .map_err(DiffError::Traversal)
  }

  fn render_patch(&self, sink: &mut dyn LineSink) -> Result<()> {
    profile!("Patch rendering");

    self
      .print(DiffFormat::Patch, |_delta, _hunk, line| {
        if is_content_line(line.origin_value()) {
          sink.on_line(line.origin(), &line.content().to_utf8());
        }
        true
      })
      .map_err(DiffError::Traversal)
  }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEvent {
  File { path: String, kind: ChangeKind },
  Hunk { path: String, header: String },
  Line { path: String, origin: char, content: String }
}

/// Append-only record of a traversal.
///
/// Replaying the log feeds a visitor the same events in the same order, and
/// the content lines double as the patch line stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
  events: Vec<DiffEvent>
}

impl EventLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> &[DiffEvent] {
    &self.events
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  pub fn push(&mut self, event: DiffEvent) {
    self.events.push(event);
  }
}

impl From<Vec<DiffEvent>> for EventLog {
  fn from(events: Vec<DiffEvent>) -> Self {
    Self { events }
  }
}

impl DiffVisitor for EventLog {
  fn on_file(&mut self, path: &str, kind: ChangeKind) {
    self.push(DiffEvent::File { path: path.to_string(), kind });
  }

  fn on_hunk(&mut self, path: &str, header: &str) {
    self.push(DiffEvent::Hunk { path: path.to_string(), header: header.to_string() });
  }

  fn on_line(&mut self, path: &str, origin: char, content: &str) {
    self.push(DiffEvent::Line {
      path:    path.to_string(),
      origin,
      content: content.to_string()
    });
  }
}

impl DiffSource for EventLog {
  fn for_each_delta(&self, visitor: &mut dyn DiffVisitor) -> Result<()> {
    for event in &self.events {
      match event {
        DiffEvent::File { path, kind } => visitor.on_file(path, *kind),
        DiffEvent::Hunk { path, header } => visitor.on_hunk(path, header),
        DiffEvent::Line { path, origin, content } => visitor.on_line(path, *origin, content)
      }
    }
    Ok(())
  }

  fn render_patch(&self, sink: &mut dyn LineSink) -> Result<()> {
    for event in &self.events {
      if let DiffEvent::Line { origin, content, .. } = event {
        sink.on_line(*origin, content);
      }
    }
    Ok(())
  }
}
