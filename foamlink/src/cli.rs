use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for foamlink
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "foamlink: directory-style links and permalinks for note trees"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the foamlink CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new foamlink configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "foamlink.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Print the published form of link targets as seen from a page.
  Resolve {
    /// Page the links appear on, relative to the pages root.
    #[arg(short, long)]
    page: String,

    /// Raw `href`/`src` values to resolve.
    #[arg(required = true)]
    targets: Vec<String>,
  },

  /// List permalinks of the pages root, or resolve the given ones.
  Permalinks {
    /// Permalinks to resolve. Unknown ones print an empty line.
    permalinks: Vec<String>,
  },

  /// Rewrite the links of one HTML file.
  Rewrite {
    /// Page the HTML belongs to, relative to the pages root.
    #[arg(short, long)]
    page: String,

    /// Input file (defaults to stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as a fragment rather than a full document.
    #[arg(long)]
    fragment: bool,
  },

  /// Render the pages root to HTML with rewritten links.
  Build {
    /// Output directory for the generated site.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
      "foamlink",
      "resolve",
      "--page",
      "guide/intro.md",
      "setup.md",
      "#top",
      "--config",
      "pages=notes",
      "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.config_overrides, ["pages=notes"]);
    assert!(matches!(
      cli.command,
      Commands::Resolve { ref page, ref targets }
        if page == "guide/intro.md" && targets == &["setup.md", "#top"]
    ));
  }

  #[test]
  fn test_resolve_requires_targets() {
    assert!(
      Cli::try_parse_from(["foamlink", "resolve", "--page", "index.md"])
        .is_err()
    );
  }

  #[test]
  fn test_init_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["foamlink", "init", "-F", "yaml"]).is_err());
  }
}
