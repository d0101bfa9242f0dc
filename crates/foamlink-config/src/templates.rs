use crate::ConfigError;

/// Default configuration in TOML, commented so a fresh file explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# foamlink configuration file

# Directory holding the page sources. Every file below it becomes a page path
# (and every suffix of that path a permalink).
pages = "pages"

# Directory holding static assets. Links that land inside it are rewritten
# relative to the site root, where assets are published.
assets = "assets"

# Extension of content files, stripped from published URLs.
extension = "md"

# Output directory for `foamlink build`.
output_dir = "build"

# Number of threads used by `foamlink build` (defaults to the CPU count).
# jobs = 4

# Resolve [[wikilinks]] through the permalink index when building.
wikilinks = true
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "pages": "pages",
  "assets": "assets",
  "extension": "md",
  "output_dir": "build",
  "jobs": null,
  "wikilinks": true
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedFormat`] for anything but TOML or JSON.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(ConfigError::UnsupportedFormat(format.to_string())),
  }
}
