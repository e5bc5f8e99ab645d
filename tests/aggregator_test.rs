use diffstat::diff::{Aggregator, ChangeKind, DiffEvent, DiffSource, DiffVisitor, EventLog};
use proptest::prelude::*;

/// Files with unique names, each holding hunks of (marker, text) lines.
fn files() -> impl Strategy<Value = Vec<(String, Vec<Vec<(char, String)>>)>> {
  let line = (prop_oneof![Just('+'), Just('-'), Just(' ')], "[a-z ]{0,12}");
  let hunk = prop::collection::vec(line, 0..6);
  let file = prop::collection::vec(hunk, 0..4);

  prop::collection::btree_map("[a-z]{1,8}\\.txt", file, 0..6).prop_map(|map| map.into_iter().collect())
}

fn to_log(files: &[(String, Vec<Vec<(char, String)>>)]) -> EventLog {
  let mut log = EventLog::new();
  for (path, hunks) in files {
    log.on_file(path, ChangeKind::Modified);
    for (n, hunk) in hunks.iter().enumerate() {
      log.on_hunk(path, &format!("@@ hunk {} @@\n", n));
      for (origin, text) in hunk {
        log.on_line(path, *origin, &format!("{}\n", text));
      }
    }
  }
  log
}

proptest! {
  #[test]
  fn records_match_changed_files(files in files()) {
    let run = Aggregator::collect(&to_log(&files)).unwrap();

    let expected: Vec<&str> = files.iter().map(|(path, _)| path.as_str()).collect();
    prop_assert_eq!(run.list_changed_files(), expected.as_slice());
    prop_assert_eq!(run.records().count(), run.list_changed_files().len());
    for path in run.list_changed_files() {
      prop_assert!(run.record(path).is_some());
    }
  }

  #[test]
  fn counters_are_exact(files in files()) {
    let run = Aggregator::collect(&to_log(&files)).unwrap();

    for (path, hunks) in &files {
      let lines = hunks.iter().flatten();
      let additions = lines.clone().filter(|(origin, _)| *origin == '+').count();
      let deletions = lines.filter(|(origin, _)| *origin == '-').count();

      let record = run.record(path).unwrap();
      prop_assert_eq!(record.additions(), additions);
      prop_assert_eq!(record.deletions(), deletions);
    }
  }

  #[test]
  fn patch_is_arrival_order_concatenation(files in files()) {
    let run = Aggregator::collect(&to_log(&files)).unwrap();

    for (path, hunks) in &files {
      let mut expected = String::new();
      for (n, hunk) in hunks.iter().enumerate() {
        expected.push_str(&format!("@@ hunk {} @@\n", n));
        for (origin, text) in hunk {
          expected.push(*origin);
          expected.push_str(text);
          expected.push('\n');
        }
      }
      prop_assert_eq!(run.patch_for(path), expected.as_str());
    }
  }

  #[test]
  fn replaying_a_log_reproduces_the_run(files in files()) {
    let log = to_log(&files);
    let first = Aggregator::collect(&log).unwrap();

    let mut copy = EventLog::new();
    log.for_each_delta(&mut copy).unwrap();
    let second = Aggregator::collect(&copy).unwrap();

    prop_assert_eq!(first, second);
  }

  #[test]
  fn diffstat_bar_is_pluses_then_minuses(additions in 0usize..20, deletions in 0usize..20) {
    let mut events = vec![DiffEvent::File { path: "f".to_string(), kind: ChangeKind::Modified }];
    // interleave markers; the bar must not
    for i in 0..additions.max(deletions) {
      if i < deletions {
        events.push(DiffEvent::Line { path: "f".to_string(), origin: '-', content: "x\n".to_string() });
      }
      if i < additions {
        events.push(DiffEvent::Line { path: "f".to_string(), origin: '+', content: "y\n".to_string() });
      }
    }

    let run = Aggregator::collect(&EventLog::from(events)).unwrap();
    let expected = format!(" f\t|    {}{}\n", "+".repeat(additions), "-".repeat(deletions));
    prop_assert!(run.diffstat().starts_with(&expected));
  }
}

#[test]
fn reordering_hunks_reorders_patch() {
  let mut forward = Aggregator::new();
  forward.begin();
  forward.on_file("a.txt", ChangeKind::Modified);
  forward.on_hunk("a.txt", "@@ 1 @@\n");
  forward.on_hunk("a.txt", "@@ 2 @@\n");

  let mut backward = Aggregator::new();
  backward.begin();
  backward.on_file("a.txt", ChangeKind::Modified);
  backward.on_hunk("a.txt", "@@ 2 @@\n");
  backward.on_hunk("a.txt", "@@ 1 @@\n");

  assert_eq!(forward.finish().patch_for("a.txt"), "@@ 1 @@\n@@ 2 @@\n");
  assert_eq!(backward.finish().patch_for("a.txt"), "@@ 2 @@\n@@ 1 @@\n");
}
