//! Utility traits for reading git2 diff callbacks.

use crate::diff::events::ChangeKind;

/// Extension trait for git2::DiffDelta to get file paths
pub trait DiffDeltaPath {
  fn path(&self) -> String;
  fn kind(&self) -> ChangeKind;
}

impl DiffDeltaPath for git2::DiffDelta<'_> {
  fn path(&self) -> String {
    self
      .new_file()
      .path_bytes()
      .or_else(|| self.old_file().path_bytes())
      .map(path_key)
      .unwrap_or_default()
  }

  fn kind(&self) -> ChangeKind {
    ChangeKind::from(self.status())
  }
}

/// Record key for a repository path.
///
/// UTF-8 paths are kept as they are. Anything else is quoted the way git
/// prints such names (`"caf\351.txt"`), escaping every byte outside printable
/// ASCII, so two distinct byte paths never share a key. A UTF-8 name that is
/// itself spelled as such a quoted string would still collide.
pub fn path_key(bytes: &[u8]) -> String {
  if let Ok(s) = std::str::from_utf8(bytes) {
    return s.to_string();
  }

  let mut quoted = String::with_capacity(bytes.len() + 2);
  quoted.push('"');
  for &byte in bytes {
    match byte {
      b'"' => quoted.push_str("\\\""),
      b'\\' => quoted.push_str("\\\\"),
      0x20..=0x7e => quoted.push(byte as char),
      _ => quoted.push_str(&format!("\\{:03o}", byte))
    }
  }
  quoted.push('"');
  quoted
}

/// Extension trait for converting bytes to UTF-8 strings
pub trait Utf8String {
  fn to_utf8(&self) -> String;
}

impl Utf8String for Vec<u8> {
  fn to_utf8(&self) -> String {
    self.as_slice().to_utf8()
  }
}

impl Utf8String for [u8] {
  fn to_utf8(&self) -> String {
    // Fast path for valid UTF-8 (most common case)
    if let Ok(s) = std::str::from_utf8(self) {
      return s.to_string();
    }
    String::from_utf8_lossy(self).into_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_utf8_string_valid() {
    let bytes = vec![72, 101, 108, 108, 111];
    assert_eq!(bytes.to_utf8(), "Hello");
  }

  #[test]
  fn test_path_key_keeps_utf8() {
    assert_eq!(path_key("src/caf\u{e9}.rs".as_bytes()), "src/caf\u{e9}.rs");
  }

  #[test]
  fn test_path_key_quotes_invalid_bytes() {
    assert_eq!(path_key(b"caf\xe9.txt"), "\"caf\\351.txt\"");
    assert_eq!(path_key(b"a\"b\\\xff"), "\"a\\\"b\\\\\\377\"");
  }

  #[test]
  fn test_path_key_distinct_for_distinct_bytes() {
    // both decode lossily to "a\u{fffd}"
    let first = path_key(b"a\xfe");
    let second = path_key(b"a\xff");
    assert_ne!(first, second);
  }

  #[test]
  fn test_utf8_string_lossy() {
    let bytes: &[u8] = &[b'a', 0xff, b'b'];
    assert_eq!(bytes.to_utf8(), "a\u{fffd}b");
  }
}
