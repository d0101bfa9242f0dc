//! DOM pass that rewrites URL-bearing attributes of a parsed page.
//!
//! | Tag                       | Attribute |
//! |---------------------------|-----------|
//! | `a`                       | `href`    |
//! | `img`, `video`, `audio`   | `src`     |
//!
//! Anchors marked with `data-wikilink` hold a permalink rather than a path and
//! are resolved through a [`PermalinkIndex`] when one is attached. Their
//! `href` arrives percent-encoded and may carry a `#heading`.
use kuchikikiki::{NodeRef, parse_html};
use log::{trace, warn};
use percent_encoding::{
  AsciiSet,
  CONTROLS,
  percent_decode_str,
  utf8_percent_encode,
};
use tendril::TendrilSink;

use crate::{
  Error,
  permalink::PermalinkIndex,
  resolve::{LinkResolver, PageContext},
  split::SplitUrl,
};

/// Attribute marking an anchor whose `href` is a permalink.
pub const WIKILINK_ATTR: &str = "data-wikilink";

/// The URL-bearing attribute for a tag, if the tag carries links at all.
#[must_use]
pub fn link_attribute(tag: &str) -> Option<&'static str> {
  match tag {
    "a" => Some("href"),
    "img" | "video" | "audio" => Some("src"),
    _ => None,
  }
}

/// Characters escaped when a resolved page path goes back into an `href`.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}');

/// Resolve a wikilink `href` through the index, keeping its query and hash.
/// Unknown permalinks give an empty string.
#[must_use]
pub fn resolve_wikilink(index: &PermalinkIndex, href: &str) -> String {
  let url = SplitUrl::parse(href);
  let permalink = percent_decode_str(&url.pathname).decode_utf8_lossy();

  let resolved = index.resolve(&permalink);
  if resolved.is_empty() {
    return resolved;
  }
  let encoded = utf8_percent_encode(&resolved, PATH_ENCODE_SET).to_string();
  url.with_pathname(&encoded)
}

/// Rewrites every link of one page.
///
/// Borrowing the [`PageContext`] ties the transform to exactly one page, so
/// concurrent pages never share it.
pub struct LinkTransform<'a> {
  resolver:   &'a LinkResolver,
  page:       &'a PageContext,
  permalinks: Option<&'a PermalinkIndex>,
}

impl<'a> LinkTransform<'a> {
  #[must_use]
  pub const fn new(resolver: &'a LinkResolver, page: &'a PageContext) -> Self {
    Self {
      resolver,
      page,
      permalinks: None,
    }
  }

  /// Resolve `data-wikilink` anchors through `index`.
  #[must_use]
  pub fn with_permalinks(mut self, index: &'a PermalinkIndex) -> Self {
    self.permalinks = Some(index);
    self
  }

  /// Rewrite links in place. Returns the number of attributes changed.
  pub fn apply(&self, document: &NodeRef) -> usize {
    let mut rewritten = 0;

    for node in document.inclusive_descendants() {
      let Some(element) = node.as_element() else {
        continue;
      };
      let Some(attr) = link_attribute(element.name.local.as_ref()) else {
        continue;
      };

      let mut attributes = element.attributes.borrow_mut();
      let Some(value) = attributes.get(attr).map(ToString::to_string) else {
        continue;
      };
      if value.is_empty() {
        continue;
      }

      let resolved = match self.permalinks {
        Some(index) if attr == "href" && attributes.contains(WIKILINK_ATTR) => {
          let resolved = resolve_wikilink(index, &value);
          if resolved.is_empty() {
            warn!(
              "{}: unknown permalink '{value}', link suppressed",
              self.page.page()
            );
          }
          resolved
        },
        _ => self.resolver.resolve(self.page, &value),
      };

      if resolved != value {
        trace!("{}: {attr}={value} -> {resolved}", self.page.page());
        attributes.insert(attr, resolved);
        rewritten += 1;
      }
    }

    rewritten
  }

  /// Parse a full HTML document, rewrite its links and serialize it again.
  ///
  /// # Errors
  ///
  /// Returns an error if the document cannot be serialized.
  pub fn rewrite_html(&self, html: &str) -> Result<String, Error> {
    let document = parse_html().one(html);
    self.apply(&document);

    let mut out = Vec::new();
    document.serialize(&mut out)?;
    Ok(String::from_utf8(out)?)
  }

  /// Rewrite the links of an HTML fragment, such as rendered page content.
  ///
  /// Only the fragment itself is serialized, without the `<html>`/`<body>`
  /// wrapper the parser adds.
  ///
  /// # Errors
  ///
  /// Returns an error if the fragment cannot be serialized.
  pub fn rewrite_fragment(&self, html: &str) -> Result<String, Error> {
    let document = parse_html().one(html);
    self.apply(&document);

    let mut out = Vec::new();
    if let Ok(body) = document.select_first("body") {
      for child in body.as_node().children() {
        child.serialize(&mut out)?;
      }
    }
    Ok(String::from_utf8(out)?)
  }
}
