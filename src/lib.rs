//! Per-file patch aggregation and diffstats for git repositories.

#[macro_export]
macro_rules! profile {
  ($name:expr) => {
    let _profile = $crate::Profile::new($name);
    let _span = tracing::span!(tracing::Level::DEBUG, $name);
    let _enter = _span.enter();
  };
}

pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod profiling;
pub mod style;

// Re-exports
pub use crate::config::DiffConfig;
pub use crate::diff::{Aggregator, DiffRun, GitDiff, PatchRecord};
pub use crate::error::{DiffError, Result};
pub use crate::git::Repo;
pub use crate::profiling::Profile;
