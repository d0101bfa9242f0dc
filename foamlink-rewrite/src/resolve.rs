//! Link resolution from authoring-time targets to published URLs.
//!
//! Pages are written as files (`guide/intro.md`) but published as directories
//! (`/guide/intro/`), so a relative link that works in the editor is off by
//! one level once the site is built. [`LinkResolver`] rewrites each target
//! according to what it points at:
//!
//! | [`LinkKind`]   | Target on `guide/intro.md` | Result               |
//! |----------------|----------------------------|----------------------|
//! | `External`     | `https://example.com`      | unchanged            |
//! | `SiteAbsolute` | `/about`                   | unchanged            |
//! | `Page`         | `../setup.md#install`      | `/setup/#install`    |
//! | `Asset`        | `../../assets/logo.png`    | `../../logo.png`     |
//! | `Fragment`     | `#usage`                   | `/guide/intro/#usage`|
//! | `Empty`        | `?preview`                 | `/?preview`          |
use std::path::Path;

use log::trace;

use crate::{Error, page::PagePath, path, split::SplitUrl};

pub const DEFAULT_PAGES: &str = "pages";
pub const DEFAULT_ASSETS: &str = "assets";
pub const DEFAULT_EXTENSION: &str = "md";

/// Root directories and content extension used to resolve links.
///
/// `pages` and `assets` are directories relative to the same site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
  /// Directory holding the page sources.
  pub pages:     String,
  /// Directory holding static assets, published at the site root.
  pub assets:    String,
  /// Extension of content files, without the leading dot.
  pub extension: String,
}

impl Default for LinkOptions {
  fn default() -> Self {
    Self {
      pages:     DEFAULT_PAGES.to_string(),
      assets:    DEFAULT_ASSETS.to_string(),
      extension: DEFAULT_EXTENSION.to_string(),
    }
  }
}

impl LinkOptions {
  #[must_use]
  pub fn new(pages: impl Into<String>, assets: impl Into<String>) -> Self {
    Self {
      pages: pages.into(),
      assets: assets.into(),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
    self.extension = extension.into();
    self
  }

  /// Blank values fall back to the defaults; roots are normalized.
  fn normalized(self) -> Self {
    let or_default = |value: String, default: &str| {
      let value = value.trim();
      if value.is_empty() {
        default.to_string()
      } else {
        value.to_string()
      }
    };

    let extension = or_default(self.extension, DEFAULT_EXTENSION);
    Self {
      pages:     path::normalize(&or_default(self.pages, DEFAULT_PAGES)),
      assets:    path::normalize(&or_default(self.assets, DEFAULT_ASSETS)),
      extension: extension.trim_start_matches('.').to_string(),
    }
  }
}

/// What a link target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
  /// Scheme-qualified URL, left untouched.
  External,
  /// Pathname starts with `/`, left untouched.
  SiteAbsolute,
  /// Relative link into the assets root.
  Asset,
  /// Relative link to anything outside the assets root.
  Page,
  /// Hash-only link into the current page.
  Fragment,
  /// Neither pathname nor hash. Publishes as the site root, keeping the
  /// query.
  Empty,
}

/// Per-page state for one traversal: the page whose links are being rewritten.
///
/// Build one per page and hand it to every visit of that page. It is never
/// mutated, so pages can be processed in parallel with their own context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
  page: PagePath,
}

impl PageContext {
  pub fn new(page: impl Into<PagePath>) -> Self {
    Self { page: page.into() }
  }

  /// Context for a source file on disk, given the pages root it lives under.
  ///
  /// # Errors
  ///
  /// Returns an error if `source` is not inside `pages_root`.
  pub fn from_source(pages_root: &Path, source: &Path) -> Result<Self, Error> {
    let relative = source.strip_prefix(pages_root).map_err(|_| {
      Error::PagesRoot(format!(
        "{} is not inside the pages root {}",
        source.display(),
        pages_root.display()
      ))
    })?;
    Ok(Self::new(PagePath::from_path(relative)))
  }

  #[must_use]
  pub const fn page(&self) -> &PagePath {
    &self.page
  }
}

/// Rewrites `href`/`src` targets for published, directory-style URLs.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
  options: LinkOptions,
}

impl LinkResolver {
  #[must_use]
  pub fn new(options: LinkOptions) -> Self {
    Self {
      options: options.normalized(),
    }
  }

  #[must_use]
  pub const fn options(&self) -> &LinkOptions {
    &self.options
  }

  /// Classify a raw target as seen from `page`.
  #[must_use]
  pub fn classify(&self, page: &PageContext, raw: &str) -> LinkKind {
    if is_external(raw) {
      return LinkKind::External;
    }
    self.classify_split(page, &SplitUrl::parse(raw))
  }

  fn classify_split(&self, page: &PageContext, url: &SplitUrl) -> LinkKind {
    if url.pathname.starts_with('/') {
      LinkKind::SiteAbsolute
    } else if !url.pathname.is_empty() {
      let target = self.target(page, &url.pathname);
      if path::is_within(&self.options.assets, &target) {
        LinkKind::Asset
      } else {
        LinkKind::Page
      }
    } else if !url.hash.is_empty() {
      LinkKind::Fragment
    } else {
      LinkKind::Empty
    }
  }

  /// Rewrite a raw `href`/`src` value found on `page`.
  ///
  /// Query and hash are carried over verbatim. External and site-absolute
  /// targets come back unchanged, as does an empty string.
  #[must_use]
  pub fn resolve(&self, page: &PageContext, raw: &str) -> String {
    if raw.is_empty() || is_external(raw) {
      return raw.to_string();
    }

    let url = SplitUrl::parse(raw);
    let kind = self.classify_split(page, &url);

    let pathname = match kind {
      LinkKind::External | LinkKind::SiteAbsolute => return raw.to_string(),
      LinkKind::Empty => self.publish(""),
      LinkKind::Asset => {
        let target = self.target(page, &url.pathname);
        self.publish(&self.asset_pathname(page, &target))
      },
      LinkKind::Page => {
        let target = self.target(page, &url.pathname);
        self.publish(&self.page_pathname(&target))
      },
      LinkKind::Fragment => self.publish(&self.fragment_pathname(page)),
    };

    let resolved = url.with_pathname(&pathname);
    trace!("{}: {raw} -> {resolved} ({kind:?})", page.page());
    resolved
  }

  /// The on-disk target of a relative pathname, relative to the site root.
  fn target(&self, page: &PageContext, pathname: &str) -> String {
    let page_dir = path::join(&self.options.pages, page.page().dir());
    path::join(&page_dir, pathname)
  }

  /// Assets are published at the site root. The path from the page (which
  /// becomes a directory once published) to the target climbs out of the
  /// pages root and back into the assets root, and that detour is cut out.
  ///
  /// The root index page is published as `/` rather than `/index/`, so its
  /// detour is one level longer.
  fn asset_pathname(&self, page: &PageContext, target: &str) -> String {
    let page_as_dir = path::join(&self.options.pages, page.page().as_str());
    let relative = path::relative(&page_as_dir, target);

    let detour = if page.page().is_root_index(&self.options.extension) {
      format!("../../{}/", self.options.assets)
    } else {
      format!("../{}/", self.options.assets)
    };

    relative.replacen(&detour, "", 1)
  }

  /// Page links become site-absolute: relative traversal breaks once pages are
  /// published at directory-style URLs.
  fn page_pathname(&self, target: &str) -> String {
    format!("/{}", path::relative(&self.options.pages, target))
  }

  fn fragment_pathname(&self, page: &PageContext) -> String {
    format!("/{}/", page.page().strip_extension(&self.options.extension))
  }

  /// Trim the content extension and any trailing `index` segment, then give
  /// anything that is not a file a trailing slash.
  fn publish(&self, pathname: &str) -> String {
    let suffix = format!(".{}", self.options.extension);
    let trimmed = pathname.strip_suffix(suffix.as_str()).unwrap_or(pathname);

    let mut published = strip_index_segment(trimmed).to_string();
    if !published.ends_with('/') && !path::has_file_extension(&published) {
      published.push('/');
    }
    published
  }
}

/// Whether a raw target is an external URL that must never be rewritten.
///
/// Anything starting with `http` counts, as does anything carrying a URL
/// scheme (`mailto:`, `tel:`, `data:`, ...).
#[must_use]
pub fn is_external(raw: &str) -> bool {
  if raw.starts_with("http") {
    return true;
  }

  let Some((scheme, _)) = raw.split_once(':') else {
    return false;
  };

  let mut chars = scheme.chars();
  chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Drop a trailing `index` or `index/` segment, keeping the slash before it.
fn strip_index_segment(pathname: &str) -> &str {
  for suffix in ["index/", "index"] {
    if let Some(rest) = pathname.strip_suffix(suffix) {
      if rest.is_empty() || rest.ends_with('/') {
        return rest;
      }
    }
  }
  pathname
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  fn resolve(page: &str, raw: &str) -> String {
    LinkResolver::default().resolve(&PageContext::new(page), raw)
  }

  #[test]
  fn test_external_links_untouched() {
    for raw in [
      "https://example.com/a.md",
      "http://example.com",
      "httpfoo",
      "mailto:someone@example.com",
      "tel:+123",
    ] {
      assert_eq!(resolve("guide/intro.md", raw), raw);
    }
  }

  #[test]
  fn test_is_external_scheme_detection() {
    assert!(is_external("mailto:a@b.c"));
    assert!(is_external("git+ssh://host/repo"));
    assert!(!is_external("guide/intro.md"));
    assert!(!is_external("intro.md#note:1"));
    assert!(!is_external("dir/file:name.md"));
    assert!(!is_external(":nothing"));
  }

  #[test]
  fn test_site_absolute_untouched() {
    assert_eq!(resolve("guide/intro.md", "/foo/bar"), "/foo/bar");
    assert_eq!(resolve("index.md", "/foo/bar.md?x#y"), "/foo/bar.md?x#y");
  }

  #[test]
  fn test_sibling_page_link() {
    assert_eq!(resolve("guide/intro.md", "other.md"), "/guide/other/");
    assert_eq!(resolve("guide/intro.md", "./other.md"), "/guide/other/");
  }

  #[test]
  fn test_parent_and_child_page_links() {
    assert_eq!(resolve("guide/intro.md", "../about.md"), "/about/");
    assert_eq!(resolve("index.md", "guide/intro.md"), "/guide/intro/");
    assert_eq!(resolve("a/b/c.md", "../../x/y.md"), "/x/y/");
  }

  #[test]
  fn test_index_collapsing() {
    assert_eq!(resolve("guide/intro.md", "../index.md"), "/");
    assert_eq!(resolve("index.md", "docs/index.md"), "/docs/");
    assert_eq!(resolve("index.md", "docs/index"), "/docs/");
    assert_eq!(resolve("index.md", "docs/index/"), "/docs/");
    // Only a whole segment named index is collapsed
    assert_eq!(resolve("index.md", "reindex.md"), "/reindex/");
  }

  #[test]
  fn test_directory_links() {
    assert_eq!(resolve("guide/intro.md", "./"), "/guide/");
    assert_eq!(resolve("guide/intro.md", "../"), "/");
    assert_eq!(resolve("index.md", "guide"), "/guide/");
  }

  #[test]
  fn test_query_and_hash_preserved() {
    assert_eq!(
      resolve("guide/intro.md", "other.md?tab=2#install"),
      "/guide/other/?tab=2#install"
    );
    assert_eq!(resolve("guide/intro.md", "other.md#a"), "/guide/other/#a");
  }

  #[test]
  fn test_non_content_file_in_pages_keeps_name() {
    assert_eq!(
      resolve("guide/intro.md", "diagram.svg"),
      "/guide/diagram.svg"
    );
  }

  #[test]
  fn test_fragment_only_link() {
    assert_eq!(
      resolve("guide/intro.md", "#section"),
      "/guide/intro/#section"
    );
    assert_eq!(resolve("index.md", "#top"), "/#top");
    assert_eq!(resolve("guide/index.md", "#top"), "/guide/#top");
  }

  #[test]
  fn test_empty_target_untouched() {
    assert_eq!(resolve("guide/intro.md", ""), "");
  }

  #[test]
  fn test_query_only_link_publishes_at_root() {
    assert_eq!(resolve("guide/intro.md", "?preview"), "/?preview");
    assert_eq!(resolve("index.md", "?a=1&b=2"), "/?a=1&b=2");
  }

  #[test]
  fn test_asset_links_from_nested_page() {
    assert_eq!(
      resolve("guide/intro.md", "../../assets/logo.png"),
      "../../logo.png"
    );
    assert_eq!(
      resolve("guide/intro.md", "../../assets/img/logo.png?v=2"),
      "../../img/logo.png?v=2"
    );
  }

  #[test]
  fn test_asset_links_from_root_index() {
    assert_eq!(resolve("index.md", "../assets/logo.png"), "logo.png");
  }

  #[test]
  fn test_asset_links_from_root_page() {
    assert_eq!(resolve("about.md", "../assets/logo.png"), "../logo.png");
  }

  #[test]
  fn test_custom_roots() {
    let resolver = LinkResolver::new(LinkOptions::new("content", "static"));
    let page = PageContext::new("guide/intro.md");
    assert_eq!(
      resolver.resolve(&page, "../../static/logo.png"),
      "../../logo.png"
    );
    assert_eq!(resolver.resolve(&page, "setup.md"), "/guide/setup/");
  }

  #[test]
  fn test_custom_extension() {
    let resolver = LinkResolver::new(
      LinkOptions::default().with_extension(".markdown"),
    );
    let page = PageContext::new("guide/intro.markdown");
    assert_eq!(resolver.resolve(&page, "setup.markdown"), "/guide/setup/");
    assert_eq!(resolver.resolve(&page, "#a"), "/guide/intro/#a");
  }

  #[test]
  fn test_blank_options_fall_back_to_defaults() {
    let resolver = LinkResolver::new(LinkOptions::new("", "  "));
    assert_eq!(resolver.options().pages, "pages");
    assert_eq!(resolver.options().assets, "assets");
    assert_eq!(resolver.options().extension, "md");
  }

  #[test]
  fn test_classify() {
    let resolver = LinkResolver::default();
    let page = PageContext::new("guide/intro.md");
    assert_eq!(resolver.classify(&page, "https://x"), LinkKind::External);
    assert_eq!(resolver.classify(&page, "/x"), LinkKind::SiteAbsolute);
    assert_eq!(
      resolver.classify(&page, "../../assets/a.png"),
      LinkKind::Asset
    );
    assert_eq!(resolver.classify(&page, "a.md"), LinkKind::Page);
    assert_eq!(resolver.classify(&page, "#a"), LinkKind::Fragment);
    assert_eq!(resolver.classify(&page, "?a"), LinkKind::Empty);
  }

  #[test]
  fn test_context_from_source() {
    let context = PageContext::from_source(
      Path::new("site/pages"),
      &Path::new("site/pages").join("guide").join("intro.md"),
    )
    .unwrap();
    assert_eq!(context.page().as_str(), "guide/intro.md");

    assert!(
      PageContext::from_source(Path::new("pages"), Path::new("other/a.md"))
        .is_err()
    );
  }
}
