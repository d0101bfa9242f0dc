use std::{fmt, path::Path};

/// A page's source path, relative to the pages root.
///
/// Always `/`-separated, without empty or `.` segments and without a leading
/// slash (`guide/intro.md`, `index.md`). Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PagePath(String);

impl PagePath {
  /// Create a page path, normalizing separators and dropping empty or `.`
  /// segments.
  pub fn new(path: impl Into<String>) -> Self {
    let path = path.into().replace('\\', "/");
    let normalized = path
      .split('/')
      .filter(|segment| !segment.is_empty() && *segment != ".")
      .collect::<Vec<_>>()
      .join("/");
    Self(normalized)
  }

  /// Create a page path from a filesystem path that is already relative to the
  /// pages root.
  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    let joined = path
      .components()
      .map(|component| component.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/");
    Self::new(joined)
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Path segments, in order.
  pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
    self.0.split('/').filter(|segment| !segment.is_empty())
  }

  /// Number of segments. `guide/intro.md` has a depth of 2.
  #[must_use]
  pub fn depth(&self) -> usize {
    self.segments().count()
  }

  /// The directory containing this page, relative to the pages root. Empty for
  /// pages at the root.
  #[must_use]
  pub fn dir(&self) -> &str {
    self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
  }

  /// Whether the final segment ends in `.{extension}`.
  #[must_use]
  pub fn has_extension(&self, extension: &str) -> bool {
    self
      .0
      .strip_suffix(extension)
      .and_then(|rest| rest.strip_suffix('.'))
      .is_some_and(|stem| !stem.is_empty() && !stem.ends_with('/'))
  }

  /// The same path with a trailing `.{extension}` removed, if present.
  #[must_use]
  pub fn strip_extension(&self, extension: &str) -> Self {
    if self.has_extension(extension) {
      let stem_len = self.0.len() - extension.len() - 1;
      Self(self.0[..stem_len].to_string())
    } else {
      self.clone()
    }
  }

  /// Whether this is the index page at the root of the pages tree.
  #[must_use]
  pub fn is_root_index(&self, extension: &str) -> bool {
    self.strip_extension(extension).as_str() == "index"
  }
}

impl fmt::Display for PagePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for PagePath {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for PagePath {
  fn from(path: &str) -> Self {
    Self::new(path)
  }
}

impl From<String> for PagePath {
  fn from(path: String) -> Self {
    Self::new(path)
  }
}

impl From<&Self> for PagePath {
  fn from(path: &Self) -> Self {
    path.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_normalizes_separators() {
    assert_eq!(PagePath::new("./guide//intro.md").as_str(), "guide/intro.md");
    assert_eq!(PagePath::new("guide\\intro.md").as_str(), "guide/intro.md");
    assert_eq!(PagePath::new("/index.md").as_str(), "index.md");
  }

  #[test]
  fn test_depth_and_dir() {
    let page = PagePath::new("a/b/c.md");
    assert_eq!(page.depth(), 3);
    assert_eq!(page.dir(), "a/b");

    let root = PagePath::new("index.md");
    assert_eq!(root.depth(), 1);
    assert_eq!(root.dir(), "");
  }

  #[test]
  fn test_strip_extension() {
    assert_eq!(
      PagePath::new("guide/intro.md").strip_extension("md").as_str(),
      "guide/intro"
    );
    assert_eq!(
      PagePath::new("guide/image.png").strip_extension("md").as_str(),
      "guide/image.png"
    );
    // A bare ".md" file has no stem to keep
    assert_eq!(PagePath::new(".md").strip_extension("md").as_str(), ".md");
    // Only a real extension counts, not a suffix of the name
    assert_eq!(PagePath::new("readmd").strip_extension("md").as_str(), "readmd");
  }

  #[test]
  fn test_is_root_index() {
    assert!(PagePath::new("index.md").is_root_index("md"));
    assert!(!PagePath::new("guide/index.md").is_root_index("md"));
    assert!(!PagePath::new("index.markdown").is_root_index("md"));
  }

  #[test]
  fn test_from_path() {
    let page = PagePath::from_path(Path::new("guide").join("intro.md").as_path());
    assert_eq!(page.as_str(), "guide/intro.md");
  }
}
