//! Classic `path | ++--` summary block.

use crate::diff::record::DiffRun;

const ADDITION: &str = "+";
const DELETION: &str = "-";

/// One line per changed file in traversal order, then the totals line.
///
/// The bar repeats each marker exactly as often as its counter; it is not
/// scaled to a width.
pub fn format(run: &DiffRun) -> String {
  let mut out = String::new();

  for (path, record) in run.records() {
    out.push(' ');
    out.push_str(path);
    out.push_str("\t|    ");
    out.push_str(&ADDITION.repeat(record.additions()));
    out.push_str(&DELETION.repeat(record.deletions()));
    out.push('\n');
  }

  let totals = run.totals();
  out.push_str(&format!(
    " {} file changed, {} insertions(+), {} deletions(-)\n",
    totals.files, totals.insertions, totals.deletions
  ));

  out
}

/// Formats `run` when a traversal happened, empty text otherwise.
pub fn format_optional(run: Option<&DiffRun>) -> String {
  run.map(format).unwrap_or_default()
}
