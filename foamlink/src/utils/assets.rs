use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::debug;

/// Copies the contents of the assets root into the output root, where asset
/// links resolve once published. A missing assets root is not an error.
///
/// # Errors
///
/// Returns an error if copying fails.
pub fn copy_assets(assets_root: &Path, output_dir: &Path) -> Result<bool> {
  if !assets_root.is_dir() {
    debug!("No assets directory at {}", assets_root.display());
    return Ok(false);
  }

  debug!(
    "Copying assets from {} to {}",
    assets_root.display(),
    output_dir.display()
  );
  fs::create_dir_all(output_dir)?;

  let options = fs_extra::dir::CopyOptions::new()
    .overwrite(true)
    .content_only(true);
  fs_extra::dir::copy(assets_root, output_dir, &options)
    .wrap_err("Failed to copy assets")?;
  Ok(true)
}

/// Copies a non-content file from the pages root to the same relative
/// location in the output.
///
/// # Errors
///
/// Returns an error if the file cannot be copied.
pub fn copy_page_file(source: &Path, destination: &Path) -> Result<()> {
  if let Some(parent) = destination.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::copy(source, destination).wrap_err_with(|| {
    format!(
      "Failed to copy {} to {}",
      source.display(),
      destination.display()
    )
  })?;
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_copy_assets_content_only() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("assets");
    fs::create_dir_all(assets.join("img")).unwrap();
    fs::write(assets.join("img/logo.png"), "png").unwrap();

    let out = dir.path().join("build");
    assert!(copy_assets(&assets, &out).unwrap());
    assert!(out.join("img/logo.png").is_file());
    assert!(!out.join("assets").exists());
  }

  #[test]
  fn test_copy_assets_missing_root() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("build");
    assert!(!copy_assets(&dir.path().join("assets"), &out).unwrap());
  }
}
