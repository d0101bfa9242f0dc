#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use foamlink_rewrite::{
  LinkOptions,
  LinkResolver,
  PageContext,
  PermalinkIndex,
  SplitUrl,
};

fn resolver() -> LinkResolver {
  LinkResolver::new(LinkOptions::default())
}

#[test]
fn test_split_then_reassemble_is_identity() {
  for raw in ["a?b#c", "a#c", "a?b", "a"] {
    assert_eq!(SplitUrl::parse(raw).to_string(), raw);
  }
}

#[test]
fn test_http_targets_are_byte_identical() {
  let resolver = resolver();
  for page in ["index.md", "guide/intro.md", "a/b/c/d.md"] {
    let page = PageContext::new(page);
    for raw in [
      "http://example.com/docs/index.md",
      "https://example.com/a?b#c",
      "https://",
    ] {
      assert_eq!(resolver.resolve(&page, raw), raw);
    }
  }
}

#[test]
fn test_absolute_targets_bypass_resolution() {
  let resolver = resolver();
  for page in ["index.md", "guide/intro.md", "a/b/c/d.md"] {
    let page = PageContext::new(page);
    assert_eq!(resolver.resolve(&page, "/foo/bar"), "/foo/bar");
    assert_eq!(resolver.resolve(&page, "/foo/bar?q#h"), "/foo/bar?q#h");
    // No extension or index trimming for absolute targets
    assert_eq!(resolver.resolve(&page, "/docs/index.md"), "/docs/index.md");
  }
}

#[test]
fn test_index_collapsing() {
  let resolver = resolver();
  let page = PageContext::new("index.md");
  assert_eq!(resolver.resolve(&page, "docs/index.md"), "/docs/");
  assert_eq!(resolver.resolve(&page, "docs/index/"), "/docs/");
  assert_eq!(resolver.resolve(&page, "docs/index.md#a"), "/docs/#a");
}

#[test]
fn test_directory_style_normalization() {
  let resolver = resolver();
  let page = PageContext::new("guide/intro.md");
  assert_eq!(resolver.resolve(&page, "other"), "/guide/other/");
  assert_eq!(resolver.resolve(&page, "image.png"), "/guide/image.png");
  assert_eq!(
    resolver.resolve(&page, "../../assets/image.png"),
    "../../image.png"
  );
}

#[test]
fn test_permalink_shallow_wins() {
  for pages in [["a/b/c.md", "x/c.md"], ["x/c.md", "a/b/c.md"]] {
    let index = PermalinkIndex::build(pages, "md");
    assert_eq!(index.resolve("c"), "/x/c");
  }
}

#[test]
fn test_permalink_tie_last_wins() {
  let index = PermalinkIndex::build(["a/c.md", "b/c.md"], "md");
  assert_eq!(index.resolve("c"), "/b/c");
}

#[test]
fn test_unknown_permalink_is_empty() {
  let index = PermalinkIndex::build(["a/c.md", "b/c.md"], "md");
  assert_eq!(index.resolve("d"), "");
  assert_eq!(index.resolve("a/c.md"), "");
}

#[test]
fn test_fragment_only_same_page_link() {
  let resolver = resolver();
  let page = PageContext::new("guide/intro.md");
  assert_eq!(resolver.resolve(&page, "#section"), "/guide/intro/#section");
}

#[test]
fn test_contexts_are_independent_across_threads() {
  let resolver = resolver();
  let pages = ["index.md", "guide/intro.md", "a/b/c.md"];

  let results: Vec<String> = std::thread::scope(|scope| {
    let handles: Vec<_> = pages
      .iter()
      .map(|page| {
        let resolver = &resolver;
        scope.spawn(move || {
          let context = PageContext::new(*page);
          resolver.resolve(&context, "#top")
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(results, ["/#top", "/guide/intro/#top", "/a/b/c/#top"]);
}
