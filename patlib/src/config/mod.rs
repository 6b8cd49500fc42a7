pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use log::info;
use patlib_render::toc::DEFAULT_SCROLL_OFFSET;
use serde::{Deserialize, Serialize};

use crate::{
  cli::{Cli, Commands, SourceArgs},
  fetch::{DEFAULT_REMOTE_BASE, Source},
  page::{NavLink, default_nav},
  router::RouterOptions,
};

/// File name of the preferences store inside the state directory.
const PREFERENCES_FILE: &str = "preferences.json";

fn default_base() -> String {
  DEFAULT_REMOTE_BASE.to_string()
}

fn default_local_root() -> PathBuf {
  PathBuf::from(".")
}

fn default_title() -> String {
  "Agent Pattern Library".to_string()
}

const fn default_scroll_offset() -> f64 {
  DEFAULT_SCROLL_OFFSET
}

/// Configuration options for patlib
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
  /// Where the catalog and pattern documents are loaded from. Addresses with
  /// an http(s) scheme are fetched, anything else is a directory.
  #[serde(default = "default_base")]
  pub base: String,

  /// Directory used instead of `base` when running against a local checkout
  #[serde(default = "default_local_root")]
  pub local_root: PathBuf,

  /// Title shown in the home page hero and the document title
  #[serde(default = "default_title")]
  pub title: String,

  /// Distance from the viewport top, in pixels, at which a heading becomes
  /// the current one in the table of contents
  #[serde(default = "default_scroll_offset")]
  pub scroll_offset: f64,

  /// Jump to anchors instead of scrolling smoothly
  #[serde(default)]
  pub reduced_motion: bool,

  /// Path of the preferences store holding the theme
  #[serde(default)]
  pub preferences_path: Option<PathBuf>,

  /// Navigation links, each naming the route key it opens
  #[serde(default = "default_nav")]
  pub nav: Vec<NavLink>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base:             default_base(),
      local_root:       default_local_root(),
      title:            default_title(),
      scroll_offset:    default_scroll_offset(),
      reduced_motion:   false,
      preferences_path: None,
      nav:              default_nav(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported.
  ///
  /// # Errors
  ///
  /// Returns an error if the file can't be read, has an unknown extension or
  /// doesn't parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .ok_or_else(|| {
        eyre!("Config file has no extension: {}", path.display())
      })?;

    match ext.as_str() {
      "json" => {
        serde_json::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse JSON config from {}", path.display())
        })
      },
      "toml" => {
        toml::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse TOML config from {}", path.display())
        })
      },
      _ => bail!("Unsupported config file format: {}", path.display()),
    }
  }

  /// Load config from a file and CLI arguments.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file fails to load or the merged
  /// configuration is invalid.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path).wrap_err_with(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else if let Some(discovered) = Self::find_config_file() {
      info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered).wrap_err_with(|| {
        format!(
          "Failed to load discovered config from {}",
          discovered.display()
        )
      })?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
  }

  /// Merge CLI arguments into this config, CLI values win.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    match &cli.command {
      Commands::Render { source, .. } | Commands::Catalog { source, .. } => {
        self.merge_source_args(source);
      },
      Commands::Theme { .. } | Commands::Init { .. } => {},
    }
  }

  fn merge_source_args(&mut self, args: &SourceArgs) {
    if let Some(base) = &args.base {
      self.base.clone_from(base);
    }
    if args.local {
      self.base = self.local_root.display().to_string();
    }
  }

  /// Check the values that serde can't.
  ///
  /// # Errors
  ///
  /// Returns an error listing every invalid value.
  pub fn validate(&self) -> Result<()> {
    let mut errors = Vec::new();

    if self.base.trim().is_empty() {
      errors.push("base must not be empty".to_string());
    }

    if !self.scroll_offset.is_finite() || self.scroll_offset < 0.0 {
      errors.push(format!(
        "scroll_offset must be a non-negative number, got {}",
        self.scroll_offset
      ));
    }

    for (index, link) in self.nav.iter().enumerate() {
      if link.page.is_empty() {
        errors.push(format!("nav link {} has no page key", index + 1));
      }
    }

    if !errors.is_empty() {
      bail!("Configuration validation errors:\n{}", errors.join("\n"));
    }
    Ok(())
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let config_filenames = [
      "patlib.toml",
      "patlib.json",
      ".patlib.toml",
      ".patlib.json",
      ".config/patlib.toml",
      ".config/patlib.json",
    ];

    let current_dir = std::env::current_dir().ok()?;
    for filename in &config_filenames {
      let config_path = current_dir.join(filename);
      if config_path.exists() {
        return Some(config_path);
      }
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let xdg_config_dir = PathBuf::from(xdg_config_home);
      for filename in &["patlib.toml", "patlib.json"] {
        let config_path = xdg_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let home_config_dir = PathBuf::from(home).join(".config").join("patlib");
      for filename in &["config.toml", "config.json"] {
        let config_path = home_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    None
  }

  /// The document source for the configured base.
  #[must_use]
  pub fn source(&self) -> Source {
    Source::from_base(&self.base)
  }

  /// Where the theme preference is stored. Falls back to the XDG state
  /// directory, then to a file in the working directory.
  #[must_use]
  pub fn preferences_path(&self) -> PathBuf {
    if let Some(path) = &self.preferences_path {
      return path.clone();
    }

    std::env::var_os("XDG_STATE_HOME")
      .map(PathBuf::from)
      .or_else(|| {
        std::env::var_os("HOME")
          .map(|home| PathBuf::from(home).join(".local").join("state"))
      })
      .map_or_else(
        || PathBuf::from(".patlib").join(PREFERENCES_FILE),
        |state| state.join("patlib").join(PREFERENCES_FILE),
      )
  }

  #[must_use]
  pub fn router_options(&self) -> RouterOptions {
    RouterOptions {
      site_title:     self.title.clone(),
      scroll_offset:  self.scroll_offset,
      reduced_motion: self.reduced_motion,
    }
  }

  /// Navigation links as configured, none active yet.
  #[must_use]
  pub fn nav_links(&self) -> Vec<NavLink> {
    self
      .nav
      .iter()
      .map(|link| NavLink::new(link.page.clone(), link.label.clone()))
      .collect()
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error for an unknown format or if the file can't be written.
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content).wrap_err_with(|| {
      format!("Failed to write default config to {}", path.display())
    })?;

    info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
