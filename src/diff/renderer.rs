//! Full patch text built from the rendered line stream.

use crate::diff::events::LineSink;

/// Collects the full patch text of a diff from its rendered line stream.
///
/// Only line content is kept; origin markers and file or hunk headers are not
/// part of this rendering.
#[derive(Debug, Default)]
pub struct PatchRenderer {
  patch: String
}

impl PatchRenderer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn full_patch(&self) -> &str {
    &self.patch
  }

  pub fn into_patch(self) -> String {
    self.patch
  }
}

impl LineSink for PatchRenderer {
  fn on_line(&mut self, _origin: char, content: &str) {
    self.patch.push_str(content);
  }
}
