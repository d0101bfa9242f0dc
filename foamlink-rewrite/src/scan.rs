//! Enumeration of page sources under the pages root.
use std::path::Path;

use log::trace;
use walkdir::WalkDir;

use crate::{Error, page::PagePath};

/// Collect every file under `pages_root`, as paths relative to it.
///
/// Entries are sorted by file name within each directory so that the
/// enumeration order, and with it permalink tie-breaking, is the same on every
/// platform.
///
/// # Errors
///
/// Returns an error if `pages_root` is not a directory or any entry below it
/// cannot be read.
pub fn collect_page_paths(pages_root: &Path) -> Result<Vec<PagePath>, Error> {
  if !pages_root.is_dir() {
    return Err(Error::PagesRoot(format!(
      "{} is not a directory",
      pages_root.display()
    )));
  }

  let mut pages = Vec::with_capacity(100);

  for entry in WalkDir::new(pages_root)
    .follow_links(true)
    .sort_by_file_name()
  {
    let entry = entry?;
    if !entry.file_type().is_file() {
      continue;
    }

    let relative = entry.path().strip_prefix(pages_root).map_err(|_| {
      Error::PagesRoot(format!(
        "{} escaped the pages root {}",
        entry.path().display(),
        pages_root.display()
      ))
    })?;
    pages.push(PagePath::from_path(relative));
  }

  trace!(
    "Found {} files under {}",
    pages.len(),
    pages_root.display()
  );
  Ok(pages)
}
