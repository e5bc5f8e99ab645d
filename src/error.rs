//! Error types for diff construction.
//!
//! Only building a diff can fail. Queries against a finished run never do:
//! absent data reads as empty.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
  #[error("Failed to open repository at {path}")]
  OpenRepository {
    path:   String,
    #[source]
    source: git2::Error
  },

  #[error("Cannot resolve revision: {rev}")]
  Revision {
    rev:    String,
    #[source]
    source: git2::Error
  },

  #[error("Commit {commit} does not point to a tree")]
  Tree {
    commit: git2::Oid,
    #[source]
    source: git2::Error
  },

  #[error("Failed to compute diff")]
  Diff(#[source] git2::Error),

  #[error("Diff traversal failed")]
  Traversal(#[source] git2::Error),

  #[error("Config error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("Git error: {0}")]
  Git(#[from] git2::Error)
}

pub type Result<T, E = DiffError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_revision_message_names_the_revision() {
    let error = DiffError::Revision {
      rev:    "no-such-branch".to_string(),
      source: git2::Error::from_str("not found")
    };
    assert_eq!(error.to_string(), "Cannot resolve revision: no-such-branch");
  }

  #[test]
  fn test_traversal_keeps_source() {
    use std::error::Error as _;

    let error = DiffError::Traversal(git2::Error::from_str("callback failed"));
    let source = error.source().map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("callback failed"));
  }

  #[test]
  fn test_git_error_converts() {
    let error: DiffError = git2::Error::from_str("boom").into();
    assert!(matches!(error, DiffError::Git(_)));
  }
}
