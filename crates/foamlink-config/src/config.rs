use std::{
  fs,
  path::{Path, PathBuf},
};

use foamlink_rewrite::{
  LinkOptions,
  resolve::{DEFAULT_ASSETS, DEFAULT_EXTENSION, DEFAULT_PAGES},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names probed, in order, when no config file is given explicitly.
const CONFIG_FILENAMES: [&str; 5] = [
  "foamlink.toml",
  "foamlink.json",
  ".foamlink.toml",
  ".foamlink.json",
  ".config/foamlink.toml",
];

/// Configuration for foamlink.
///
/// Loaded from a TOML or JSON file, then adjusted with `--config KEY=VALUE`
/// overrides from the command line. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory holding the page sources.
  pub pages: String,

  /// Directory holding static assets.
  pub assets: String,

  /// Extension of content files, without the leading dot.
  pub extension: String,

  /// Output directory for built sites.
  pub output_dir: PathBuf,

  /// Number of threads to use for building.
  pub jobs: Option<usize>,

  /// Whether `[[wikilinks]]` are parsed and resolved through the permalink
  /// index.
  pub wikilinks: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      pages:      DEFAULT_PAGES.to_string(),
      assets:     DEFAULT_ASSETS.to_string(),
      extension:  DEFAULT_EXTENSION.to_string(),
      output_dir: PathBuf::from("build"),
      jobs:       None,
      wikilinks:  true,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON, by extension).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
      })?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from explicit files, or a discovered one, then apply
  /// overrides.
  ///
  /// Explicit files are merged in order, later files winning. Without any,
  /// the current directory is searched; failing that, defaults are used.
  ///
  /// # Errors
  ///
  /// Returns an error if any file fails to load or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for path in rest {
        merged.merge(Self::from_file(path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Look for a config file in the current directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Look for a config file in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Apply `KEY=VALUE` overrides in order.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is malformed, names an unknown key, or
  /// carries a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "pages" => value.clone_into(&mut self.pages),
      "assets" => value.clone_into(&mut self.assets),
      "extension" => value.clone_into(&mut self.extension),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(|_| {
            ConfigError::Config(format!(
              "Invalid value for 'jobs': '{value}'. Expected a number"
            ))
          })?)
        };
      },
      "wikilinks" => self.wikilinks = parse_bool(key, value)?,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }

    Ok(())
  }

  /// Merge `other` into `self`. Fields of `other` that differ from the
  /// default replace the current value.
  pub fn merge(&mut self, other: Self) {
    let default = Self::default();

    if other.pages != default.pages {
      self.pages = other.pages;
    }
    if other.assets != default.assets {
      self.assets = other.assets;
    }
    if other.extension != default.extension {
      self.extension = other.extension;
    }
    if other.output_dir != default.output_dir {
      self.output_dir = other.output_dir;
    }
    if other.jobs.is_some() {
      self.jobs = other.jobs;
    }
    if other.wikilinks != default.wikilinks {
      self.wikilinks = other.wikilinks;
    }
  }

  /// Options for the link resolver.
  #[must_use]
  pub fn link_options(&self) -> LinkOptions {
    LinkOptions::new(&*self.pages, &*self.assets)
      .with_extension(&*self.extension)
  }

  /// Write a commented default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)?;

    fs::write(path, config_content).map_err(|source| {
      ConfigError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'"
      )))
    },
  }
}
