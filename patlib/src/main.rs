use std::{
  fs,
  io::{self, Write},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use patlib::{
  Page,
  Router,
  cli::{Cli, Commands},
  config::Config,
  fetch::{CATALOG_PATH, Fetch},
  html,
  theme::{JsonFileStore, ThemeController},
};
use patlib_render::Catalog;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init_config(output, format, *force);
  }

  let config = Config::load(&cli)?;

  match &cli.command {
    Commands::Render {
      route, fragment, ..
    } => render(&config, route.as_deref(), *fragment),
    Commands::Catalog { json, .. } => print_catalog(&config, *json),
    Commands::Theme { toggle } => theme(&config, *toggle),
    Commands::Init { .. } => Ok(()),
  }
}

fn init_config(output: &std::path::Path, format: &str, force: bool) -> Result<()> {
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

  info!("Configuration file created. Edit it to point patlib at your library.");
  Ok(())
}

/// Load the page at `route` the way a browser would and print it.
fn render(config: &Config, route: Option<&str>, fragment: bool) -> Result<()> {
  let mut page = Page::new(config.nav_links());
  if let Some(route) = route {
    page.location.set_hash(route);
  }

  let mut router = Router::new(config.source(), page, config.router_options());
  let resolved = router.start();
  info!("Rendered {resolved:?}");

  let output = if fragment {
    router.page().content_html()
  } else {
    let theme =
      ThemeController::load(JsonFileStore::open(config.preferences_path()));
    html::template::render_page(
      router.page(),
      router.catalog(),
      &config.title,
      theme.theme(),
    )
    .wrap_err("Failed to render page")?
  };

  writeln!(io::stdout().lock(), "{output}")?;
  Ok(())
}

fn print_catalog(config: &Config, json: bool) -> Result<()> {
  let source = config.source();
  let markdown = source.fetch_text(CATALOG_PATH).wrap_err_with(|| {
    format!("Failed to load catalog from {}", source.location(CATALOG_PATH))
  })?;
  let catalog = Catalog::parse(&markdown);

  let mut out = io::stdout().lock();
  if json {
    writeln!(out, "{}", serde_json::to_string_pretty(catalog.patterns())?)?;
    return Ok(());
  }

  for record in catalog.patterns() {
    writeln!(
      out,
      "{:<12} {:<32} {}",
      record.category.as_deref().unwrap_or("-"),
      record.id,
      record.description
    )?;
  }
  info!("{} patterns", catalog.len());
  Ok(())
}

fn theme(config: &Config, toggle: bool) -> Result<()> {
  let path = config.preferences_path();
  let mut controller = ThemeController::load(JsonFileStore::open(&path));
  if toggle {
    controller.toggle().wrap_err_with(|| {
      format!("Failed to save theme preference to {}", path.display())
    })?;
  }
  writeln!(io::stdout().lock(), "{}", controller.theme())?;
  Ok(())
}
