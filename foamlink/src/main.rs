use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use foamlink::{
  cli::{Cli, Commands},
  utils,
};
use foamlink_config::Config;
use foamlink_rewrite::{
  LinkResolver,
  LinkTransform,
  PageContext,
  PermalinkIndex,
};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init(output, format, *force);
  }

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)?;

  match cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Resolve { page, targets } => resolve(&config, &page, &targets),
    Commands::Permalinks { permalinks } => {
      print_permalinks(&config, &permalinks)
    },
    Commands::Rewrite {
      page,
      input,
      output,
      fragment,
    } => {
      rewrite(&config, &page, input.as_deref(), output.as_deref(), fragment)
    },
    Commands::Build { output_dir, jobs } => {
      if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
      }
      if jobs.is_some() {
        config.jobs = jobs;
      }
      build(&config)
    },
  }
}

fn init(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!("Configuration file created successfully.");
  Ok(())
}

fn resolve(config: &Config, page: &str, targets: &[String]) -> Result<()> {
  let resolver = LinkResolver::new(config.link_options());
  let context = PageContext::new(page);

  let mut stdout = io::stdout().lock();
  for target in targets {
    writeln!(stdout, "{}", resolver.resolve(&context, target))?;
  }
  Ok(())
}

fn print_permalinks(config: &Config, permalinks: &[String]) -> Result<()> {
  let pages_root = PathBuf::from(&config.pages);
  let index = PermalinkIndex::from_pages_root(&pages_root, &config.extension)
    .wrap_err_with(|| {
      format!("Failed to index pages under {}", pages_root.display())
    })?;

  let mut stdout = io::stdout().lock();
  if permalinks.is_empty() {
    for permalink in index.permalinks() {
      writeln!(stdout, "{permalink}\t{}", index.resolve(permalink))?;
    }
  } else {
    for permalink in permalinks {
      writeln!(stdout, "{}", index.resolve(permalink))?;
    }
  }
  Ok(())
}

fn rewrite(
  config: &Config,
  page: &str,
  input: Option<&Path>,
  output: Option<&Path>,
  fragment: bool,
) -> Result<()> {
  let html = match input {
    Some(path) => {
      fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?
    },
    None => io::read_to_string(io::stdin()).wrap_err("Failed to read stdin")?,
  };

  let resolver = LinkResolver::new(config.link_options());
  let context = PageContext::new(page);
  let transform = LinkTransform::new(&resolver, &context);
  let rewritten = if fragment {
    transform.rewrite_fragment(&html)?
  } else {
    transform.rewrite_html(&html)?
  };

  match output {
    Some(path) => {
      fs::write(path, rewritten)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    },
    None => io::stdout().lock().write_all(rewritten.as_bytes())?,
  }
  Ok(())
}

fn build(config: &Config) -> Result<()> {
  info!("Starting site build...");
  let summary = utils::build_site(Path::new("."), config)?;
  info!(
    "Built {} pages, copied {} page files{}",
    summary.pages,
    summary.files,
    if summary.assets { " and assets" } else { "" }
  );
  Ok(())
}
