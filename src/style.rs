//! Terminal coloring for diffstat and patch output.

use colored::Colorize;

pub trait Styled {
  fn styled_stat(&self) -> String;
  fn styled_patch(&self) -> String;
}

impl Styled for str {
  /// Colors the `+`/`-` bar of each diffstat line; the totals line is bolded.
  fn styled_stat(&self) -> String {
    self
      .split_inclusive('\n')
      .map(|line| match line.split_once("\t|    ") {
        Some((path, bar)) => {
          let pluses = bar.chars().take_while(|c| *c == '+').count();
          let (adds, rest) = bar.split_at(pluses);
          format!("{}\t|    {}{}", path, adds.green(), rest.trim_end_matches('\n').red()) +
            if line.ends_with('\n') { "\n" } else { "" }
        }
        None => line.bold().to_string()
      })
      .collect()
  }

  /// Colors added and removed lines of a patch.
  fn styled_patch(&self) -> String {
    self
      .split_inclusive('\n')
      .map(|line| {
        if line.starts_with("@@") {
          line.cyan().to_string()
        } else if line.starts_with('+') {
          line.green().to_string()
        } else if line.starts_with('-') {
          line.red().to_string()
        } else {
          line.to_string()
        }
      })
      .collect()
  }
}
