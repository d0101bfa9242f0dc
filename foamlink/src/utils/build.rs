use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use foamlink_config::Config;
use foamlink_rewrite::{
  LinkResolver,
  LinkTransform,
  PageContext,
  PagePath,
  PermalinkIndex,
  collect_page_paths,
};
use log::{debug, info};
use rayon::prelude::*;

use super::{assets, markdown};

/// What a build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  /// Content pages rendered to HTML.
  pub pages:  usize,
  /// Other files under the pages root, copied as-is.
  pub files:  usize,
  /// Whether an assets root was found and copied.
  pub assets: bool,
}

/// Shared, read-only state of one build. Each page gets its own
/// [`PageContext`] on top of it.
struct Site<'a> {
  pages_root: &'a Path,
  output_dir: &'a Path,
  resolver:   &'a LinkResolver,
  permalinks: Option<&'a PermalinkIndex>,
}

/// Where a page is written, relative to the output directory.
///
/// Pages become directories (`guide/intro.md` is `guide/intro/index.html`),
/// index pages take the place of their directory (`guide/index.md` is
/// `guide/index.html`).
#[must_use]
pub fn output_path_for(page: &PagePath, extension: &str) -> PathBuf {
  let stem = page.strip_extension(extension);
  let mut segments: Vec<&str> = stem.segments().collect();
  if segments.last() == Some(&"index") {
    segments.pop();
  }

  let mut path: PathBuf = segments.into_iter().collect();
  path.push("index.html");
  path
}

/// Render every content page under `root`, rewrite its links and write the
/// site to the configured output directory.
///
/// `pages`, `assets` and `output_dir` are taken relative to `root`.
///
/// # Errors
///
/// Returns an error if the pages root cannot be scanned, or any page fails to
/// render, or output cannot be written.
pub fn build_site(root: &Path, config: &Config) -> Result<BuildSummary> {
  let pages_root = root.join(&config.pages);
  let output_dir = root.join(&config.output_dir);
  let resolver = LinkResolver::new(config.link_options());
  let extension = resolver.options().extension.as_str();

  info!("Pages directory: {}", pages_root.display());
  let pages = collect_page_paths(&pages_root).wrap_err_with(|| {
    format!("Failed to scan pages directory {}", pages_root.display())
  })?;
  let permalinks = PermalinkIndex::build(&pages, extension);

  let (content, files): (Vec<&PagePath>, Vec<&PagePath>) =
    pages.iter().partition(|page| page.has_extension(extension));
  info!("Found {} pages and {} other files", content.len(), files.len());
  check_output_collisions(&content, extension)?;

  fs::create_dir_all(&output_dir).wrap_err_with(|| {
    format!("Failed to create output directory {}", output_dir.display())
  })?;

  let site = Site {
    pages_root: &pages_root,
    output_dir: &output_dir,
    resolver:   &resolver,
    permalinks: config.wikilinks.then_some(&permalinks),
  };

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get).max(1);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to build thread pool")?;
  debug!("Rendering with {thread_count} threads");

  pool.install(|| {
    content
      .par_iter()
      .try_for_each(|page| render_page(&site, page))
  })?;

  for file in &files {
    assets::copy_page_file(
      &pages_root.join(file.as_str()),
      &output_dir.join(file.as_str()),
    )?;
  }

  let assets = assets::copy_assets(&root.join(&config.assets), &output_dir)?;

  info!("Site generated in {}", output_dir.display());
  Ok(BuildSummary {
    pages: content.len(),
    files: files.len(),
    assets,
  })
}

/// Fail if two pages would be written to the same file, e.g. `guide.md` and
/// `guide/index.md`.
fn check_output_collisions(
  pages: &[&PagePath],
  extension: &str,
) -> Result<()> {
  let mut outputs: HashMap<PathBuf, &PagePath> =
    HashMap::with_capacity(pages.len());

  for &page in pages {
    let output = output_path_for(page, extension);
    if let Some(previous) = outputs.get(&output) {
      bail!(
        "Pages {previous} and {page} would both be written to {}",
        output.display()
      );
    }
    outputs.insert(output, page);
  }
  Ok(())
}

fn render_page(site: &Site<'_>, page: &PagePath) -> Result<()> {
  let source = site.pages_root.join(page.as_str());
  let content = fs::read_to_string(&source)
    .wrap_err_with(|| format!("Failed to read {}", source.display()))?;

  let context = PageContext::new(page);
  let mut transform = LinkTransform::new(site.resolver, &context);
  if let Some(index) = site.permalinks {
    transform = transform.with_permalinks(index);
  }

  let body = markdown::render(&content, site.permalinks.is_some());
  let body = transform
    .rewrite_fragment(&body)
    .wrap_err_with(|| format!("Failed to rewrite links of {page}"))?;

  let extension = site.resolver.options().extension.as_str();
  let stem = page.strip_extension(extension);
  let title = markdown::page_title(&content)
    .or_else(|| stem.segments().next_back())
    .unwrap_or_default();

  let output = site.output_dir.join(output_path_for(page, extension));
  if let Some(parent) = output.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&output, wrap_document(title, &body))
    .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

  debug!("{page} -> {}", output.display());
  Ok(())
}

fn wrap_document(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</\
     title>\n</head>\n<body>\n{body}</body>\n</html>\n",
    html_escape::encode_text(title)
  )
}
