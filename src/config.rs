//! Diff options loaded from defaults, a config file and the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use config::{Config, Environment, File, FileFormat};
use git2::DiffOptions;

use crate::error::Result;

// Constants
const DEFAULT_CONTEXT_LINES: i64 = 3;
const DEFAULT_INTERHUNK_LINES: i64 = 0;
const ENV_PREFIX: &str = "GIT_DIFFSTAT";

/// Options handed to libgit2 when computing a diff.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Serialize)]
pub struct DiffConfig {
  pub context_lines:            u32,
  pub interhunk_lines:          u32,
  pub ignore_whitespace:        bool,
  pub ignore_whitespace_change: bool,
  pub ignore_whitespace_eol:    bool,
  pub include_untracked:        bool,
  pub patience:                 bool,
  pub minimal:                  bool
}

impl Default for DiffConfig {
  fn default() -> Self {
    Self {
      context_lines:            DEFAULT_CONTEXT_LINES as u32,
      interhunk_lines:          DEFAULT_INTERHUNK_LINES as u32,
      ignore_whitespace:        false,
      ignore_whitespace_change: false,
      ignore_whitespace_eol:    false,
      include_untracked:        false,
      patience:                 false,
      minimal:                  false
    }
  }
}

/// `~/.config/git-diffstat/config.ini`, if a home directory is known.
pub fn config_file() -> Option<PathBuf> {
  home::home_dir().map(|home| home.join(".config/git-diffstat/config.ini"))
}

fn environment() -> Environment {
  Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

impl DiffConfig {
  /// Defaults, then the user config file, then `GIT_DIFFSTAT_*` variables.
  pub fn load() -> Result<Self> {
    Self::load_from(config_file())
  }

  pub fn load_from(file: Option<PathBuf>) -> Result<Self> {
    Self::load_with(file, environment())
  }

  fn load_with(file: Option<PathBuf>, env: Environment) -> Result<Self> {
    let mut builder = Config::builder()
      .set_default("context_lines", DEFAULT_CONTEXT_LINES)?
      .set_default("interhunk_lines", DEFAULT_INTERHUNK_LINES)?
      .set_default("ignore_whitespace", false)?
      .set_default("ignore_whitespace_change", false)?
      .set_default("ignore_whitespace_eol", false)?
      .set_default("include_untracked", false)?
      .set_default("patience", false)?
      .set_default("minimal", false)?;

    if let Some(file) = file {
      log::debug!("Reading config from {}", file.display());
      builder = builder.add_source(File::new(file.to_string_lossy().as_ref(), FileFormat::Ini).required(false));
    }

    let config = builder
      .add_source(env)
      .build()?;

    Ok(config.try_deserialize()?)
  }

  pub fn apply(&self, opts: &mut DiffOptions) {
    opts
      .context_lines(self.context_lines)
      .interhunk_lines(self.interhunk_lines)
      .ignore_whitespace(self.ignore_whitespace)
      .ignore_whitespace_change(self.ignore_whitespace_change)
      .ignore_whitespace_eol(self.ignore_whitespace_eol)
      .include_untracked(self.include_untracked)
      .recurse_untracked_dirs(self.include_untracked)
      .show_untracked_content(self.include_untracked)
      .include_ignored(false)
      .ignore_submodules(true)
      .patience(self.patience)
      .minimal(self.minimal);
  }

  pub fn diff_options(&self) -> DiffOptions {
    let mut opts = DiffOptions::new();
    self.apply(&mut opts);
    opts
  }
}
