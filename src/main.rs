//! `git-diffstat` command line: patches, diffstats and tree listings.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use diffstat::style::Styled;
use diffstat::{DiffConfig, GitDiff, Repo};

#[derive(Parser, Debug)]
#[clap(name = "git-diffstat", author, version, about = "Per-file patches and diffstats for git diffs")]
struct Cli {
  /// Path inside the repository (defaults to $GIT_DIR or the current directory)
  #[clap(long, global = true)]
  repo: Option<PathBuf>,

  /// Disable colored output
  #[clap(long, global = true)]
  no_color: bool,

  #[clap(subcommand)]
  command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Diff the trees of two commits
  Diff {
    from: String,
    to:   String,

    /// Print the full patch text instead of the diffstat
    #[clap(long, conflicts_with_all = ["files", "file"])]
    patch: bool,

    /// Print only the changed file names
    #[clap(long, conflicts_with = "file")]
    files: bool,

    /// Print the patch of a single file
    #[clap(long)]
    file: Option<String>
  },

  /// Report uncommitted changes; exits with 1 when there are any
  Status,

  /// List every file in the tree of a commit
  LsTree { rev: String }
}

fn open_repo(cli: &Cli) -> Result<Repo> {
  let config = DiffConfig::load().context("Failed to load config")?;
  let repo = match &cli.repo {
    Some(path) => Repo::open(path),
    None => Repo::open_from_env()
  }
  .context("Failed to open repository")?;

  Ok(repo.with_config(config))
}

fn run(cli: &Cli) -> Result<ExitCode> {
  let repo = open_repo(cli)?;

  match &cli.command {
    Command::Diff { from, to, patch, files, file } => {
      let from = repo.commit(from)?;
      let to = repo.commit(to)?;
      let diff = GitDiff::between(&repo, &from, &to).context("Failed to diff commits")?;

      if *files {
        for path in diff.list_changed_files() {
          println!("{}", path);
        }
      } else if let Some(path) = file {
        print!("{}", diff.patch_for(path).styled_patch());
      } else if *patch {
        print!("{}", diff.full_patch());
      } else {
        print!("{}", diff.diffstat().styled_stat());
      }
    }
    Command::Status => {
      let mut diff = GitDiff::new();
      let dirty = diff.diff_working_directory(&repo).context("Failed to diff working directory")?;

      if !dirty {
        println!("Nothing to commit, working tree clean");
        return Ok(ExitCode::SUCCESS);
      }

      print!("{}", diff.diffstat().styled_stat());
      return Ok(ExitCode::from(1));
    }
    Command::LsTree { rev } => {
      for path in repo.tree_blob_paths(rev)? {
        println!("{}", path);
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
  dotenv().ok();
  env_logger::init();

  let cli = Cli::parse();
  if cli.no_color {
    colored::control::set_override(false);
  }

  log::debug!("Running git-diffstat: {:?}", cli.command);
  run(&cli)
}
