//! # foamlink-rewrite
//!
//! Link rewriting for note-style content trees that are published as
//! directory-style URLs.
//!
//! Authors write links against source files (`../guide/intro.md`,
//! `../../assets/diagram.png`, `#section`). Once `guide/intro.md` is published
//! at `/guide/intro/`, those relative links point at the wrong place. This
//! crate rewrites them, and additionally lets any page be addressed by a short
//! suffix of its path (a *permalink*).
//!
//! ## Quick Start
//!
//! ```rust
//! use foamlink_rewrite::{LinkOptions, LinkResolver, PageContext, PermalinkIndex};
//!
//! let resolver = LinkResolver::new(LinkOptions::default());
//! let page = PageContext::new("guide/intro.md");
//!
//! assert_eq!(resolver.resolve(&page, "other.md#setup"), "/guide/other/#setup");
//! assert_eq!(resolver.resolve(&page, "#usage"), "/guide/intro/#usage");
//!
//! let index = PermalinkIndex::build(["guide/intro.md", "intro.md"], "md");
//! assert_eq!(index.resolve("intro"), "/intro");
//! assert_eq!(index.resolve("missing"), "");
//! ```
//!
//! ## Rewriting HTML
//!
//! ```rust
//! use foamlink_rewrite::{LinkOptions, LinkResolver, LinkTransform, PageContext};
//!
//! let resolver = LinkResolver::new(LinkOptions::default());
//! let page = PageContext::new("guide/intro.md");
//! let html = LinkTransform::new(&resolver, &page)
//!   .rewrite_fragment(r#"<a href="setup.md">Setup</a>"#)
//!   .unwrap_or_default();
//!
//! assert_eq!(html, r#"<a href="/guide/setup/">Setup</a>"#);
//! ```

mod error;
mod page;
pub mod path;
pub mod permalink;
pub mod resolve;
pub mod scan;
pub mod split;
pub mod transform;

pub use crate::{
  error::Error,
  page::PagePath,
  permalink::PermalinkIndex,
  resolve::{LinkKind, LinkOptions, LinkResolver, PageContext, is_external},
  scan::collect_page_paths,
  split::SplitUrl,
  transform::LinkTransform,
};
