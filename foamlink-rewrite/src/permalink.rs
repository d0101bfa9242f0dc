//! Short-link lookup by path suffix.
//!
//! Every suffix of a page's path is a permalink for it: `guide/setup/nix`
//! can be addressed as `nix`, `setup/nix` or `guide/setup/nix`. When several
//! pages share a suffix, the shallowest page wins, and among equally shallow
//! pages the one enumerated last wins.
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{Error, page::PagePath, scan::collect_page_paths};

/// Immutable map from permalink to the canonical page it resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermalinkIndex {
  entries: IndexMap<String, PagePath>,
}

impl PermalinkIndex {
  /// Build the index from page paths relative to the pages root, in
  /// enumeration order.
  ///
  /// The content `extension` is stripped from each page first, so
  /// `guide/intro.md` registers `intro` and `guide/intro`.
  pub fn build<I>(pages: I, extension: &str) -> Self
  where
    I: IntoIterator,
    I::Item: Into<PagePath>,
  {
    let extension = extension.trim_start_matches('.');
    let mut pages: Vec<PagePath> = pages
      .into_iter()
      .map(|page| page.into().strip_extension(extension))
      .filter(|page| !page.is_empty())
      .collect();

    // Stable: equally deep pages keep their enumeration order, so the fold
    // below lets the last of them win.
    pages.sort_by_key(PagePath::depth);

    let entries = pages.iter().fold(IndexMap::new(), register);

    debug!(
      "Built permalink index: {} permalinks for {} pages",
      entries.len(),
      pages.len()
    );
    Self { entries }
  }

  /// Scan `pages_root` and build the index from every file found.
  ///
  /// # Errors
  ///
  /// Returns an error if the pages root cannot be enumerated.
  pub fn from_pages_root(
    pages_root: &Path,
    extension: &str,
  ) -> Result<Self, Error> {
    let pages = collect_page_paths(pages_root)?;
    Ok(Self::build(pages, extension))
  }

  /// Registered permalinks, in order of first registration.
  pub fn permalinks(&self) -> impl ExactSizeIterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Permalinks with the page each resolves to.
  pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &PagePath)> {
    self.entries.iter().map(|(key, page)| (key.as_str(), page))
  }

  /// The canonical page for a permalink, without its content extension.
  #[must_use]
  pub fn get(&self, permalink: &str) -> Option<&PagePath> {
    self.entries.get(permalink)
  }

  /// Resolve a permalink to a site-absolute path.
  ///
  /// A trailing `index` segment is dropped (`guide/index` → `/guide`, `index`
  /// → `/`). Unknown permalinks resolve to an empty string so the link becomes
  /// a no-op instead of an error.
  #[must_use]
  pub fn resolve(&self, permalink: &str) -> String {
    let Some(page) = self.entries.get(permalink) else {
      trace!("Unknown permalink: {permalink}");
      return String::new();
    };

    let path = page.as_str();
    let path = match path.strip_suffix("index") {
      Some(dir) if dir.is_empty() || dir.ends_with('/') => {
        dir.trim_end_matches('/')
      },
      _ => path,
    };

    format!("/{}", path.trim_start_matches('/'))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Register every suffix of `page`. An existing entry is replaced unless it
/// points at a strictly shallower page.
fn register(
  mut entries: IndexMap<String, PagePath>,
  page: &PagePath,
) -> IndexMap<String, PagePath> {
  let segments: Vec<&str> = page.segments().collect();
  let depth = segments.len();

  for start in (0..depth).rev() {
    let permalink = segments[start..].join("/");

    match entries.get(&permalink) {
      Some(existing) if existing.depth() < depth => {},
      Some(existing) => {
        trace!("Permalink {permalink}: {existing} replaced by {page}");
        entries.insert(permalink, page.clone());
      },
      None => {
        entries.insert(permalink, page.clone());
      },
    }
  }

  entries
}
