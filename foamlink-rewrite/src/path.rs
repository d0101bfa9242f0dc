//! Lexical path algebra over `/`-separated strings.
//!
//! Nothing here touches the filesystem. Every root is interpreted relative to
//! one common site root, so `pages/guide` and `assets/img.png` can be related
//! to each other without knowing where the site lives on disk.

/// Split a path into its normalized segments, resolving `.` and `..`.
///
/// Leading `..` segments are kept for relative paths and clamped away for
/// absolute ones.
fn normalized_segments(path: &str) -> (bool, Vec<&str>) {
  let absolute = path.starts_with('/');
  let mut segments: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    match segment {
      "" | "." => {},
      ".." => {
        if segments.last().is_some_and(|last| *last != "..") {
          segments.pop();
        } else if !absolute {
          segments.push("..");
        }
      },
      _ => segments.push(segment),
    }
  }

  (absolute, segments)
}

/// Normalize a path: resolve `.` and `..`, collapse repeated slashes, drop a
/// trailing slash.
///
/// - `normalize("a/./b/../c")` → `"a/c"`
/// - `normalize("../a")` → `"../a"`
/// - `normalize("/../a")` → `"/a"`
#[must_use]
pub fn normalize(path: &str) -> String {
  let (absolute, segments) = normalized_segments(path);
  let joined = segments.join("/");
  if absolute { format!("/{joined}") } else { joined }
}

/// Join `rel` onto `base` and normalize. An absolute `rel` replaces `base`.
#[must_use]
pub fn join(base: &str, rel: &str) -> String {
  if base.is_empty() || rel.starts_with('/') {
    normalize(rel)
  } else {
    normalize(&format!("{base}/{rel}"))
  }
}

/// The path leading from directory `from` to `to`.
///
/// Both are treated as directories relative to the same root. Returns an empty
/// string when they are the same.
///
/// - `relative("pages/guide", "pages/other.md")` → `"../other.md"`
/// - `relative("pages", "pages/guide/intro.md")` → `"guide/intro.md"`
#[must_use]
pub fn relative(from: &str, to: &str) -> String {
  let (_, from) = normalized_segments(from);
  let (_, to) = normalized_segments(to);

  let common = from
    .iter()
    .zip(&to)
    .take_while(|(from, to)| from == to)
    .count();

  let mut parts = vec![".."; from.len() - common];
  parts.extend_from_slice(&to[common..]);
  parts.join("/")
}

/// Whether `path` lies inside `base` (or is `base` itself).
#[must_use]
pub fn is_within(base: &str, path: &str) -> bool {
  let rel = relative(base, path);
  rel.split('/').next() != Some("..")
}

/// Whether the final segment names a file, i.e. has a `.` after the last
/// slash.
#[must_use]
pub fn has_file_extension(path: &str) -> bool {
  let last_slash = path.rfind('/');
  path
    .rfind('.')
    .is_some_and(|dot| last_slash.is_none_or(|slash| dot > slash))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize() {
    assert_eq!(normalize("a/./b/../c"), "a/c");
    assert_eq!(normalize("a//b/"), "a/b");
    assert_eq!(normalize("../a"), "../a");
    assert_eq!(normalize("a/../../b"), "../b");
    assert_eq!(normalize("/../a"), "/a");
    assert_eq!(normalize("."), "");
    assert_eq!(normalize(""), "");
  }

  #[test]
  fn test_join() {
    assert_eq!(join("pages/guide", "other.md"), "pages/guide/other.md");
    assert_eq!(join("pages/guide", "../../assets/a.png"), "assets/a.png");
    assert_eq!(join("pages", "./"), "pages");
    assert_eq!(join("", "a/b"), "a/b");
    assert_eq!(join("pages", "/abs"), "/abs");
  }

  #[test]
  fn test_relative() {
    assert_eq!(relative("pages/guide", "pages/other.md"), "../other.md");
    assert_eq!(relative("pages", "pages/guide/intro.md"), "guide/intro.md");
    assert_eq!(
      relative("pages/guide/intro.md", "assets/a.png"),
      "../../../assets/a.png"
    );
    assert_eq!(relative("pages/index.md", "assets/a.png"), "../../assets/a.png");
    assert_eq!(relative("pages", "pages"), "");
    assert_eq!(relative("pages", "other.md"), "../other.md");
  }

  #[test]
  fn test_is_within() {
    assert!(is_within("assets", "assets/img/a.png"));
    assert!(is_within("assets", "assets"));
    assert!(!is_within("assets", "pages/a.png"));
    // Prefix match is per segment, not per character
    assert!(!is_within("assets", "assets-old/a.png"));
    assert!(is_within("", "anything"));
  }

  #[test]
  fn test_has_file_extension() {
    assert!(has_file_extension("../../image.png"));
    assert!(has_file_extension("image.png"));
    assert!(!has_file_extension("/guide/intro"));
    assert!(!has_file_extension("/v1.2/guide"));
    assert!(!has_file_extension(""));
  }
}
