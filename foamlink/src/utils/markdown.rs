use comrak::{Options, markdown_to_html};

/// Build comrak options for page rendering.
///
/// With `wikilinks` set, `[[target|Title]]` becomes an anchor carrying a
/// `data-wikilink` attribute, which the link pass resolves as a permalink.
#[must_use]
pub fn comrak_options(wikilinks: bool) -> Options<'static> {
  let mut options = Options::default();
  options.extension.table = true;
  options.extension.footnotes = true;
  options.extension.strikethrough = true;
  options.extension.tasklist = true;
  options.extension.autolink = true;
  options.extension.wikilinks_title_after_pipe = wikilinks;
  options.render.r#unsafe = true;
  options
}

/// Render markdown to an HTML fragment.
#[must_use]
pub fn render(content: &str, wikilinks: bool) -> String {
  markdown_to_html(content, &comrak_options(wikilinks))
}

/// Text of the first level-one ATX heading, if any.
#[must_use]
pub fn page_title(content: &str) -> Option<&str> {
  content
    .lines()
    .find_map(|line| line.strip_prefix("# "))
    .map(str::trim)
    .filter(|title| !title.is_empty())
}
