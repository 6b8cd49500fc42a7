use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface for patlib
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "patlib: render and browse a markdown pattern library"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// Where to load documents from, shared by the commands that fetch.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
  /// Read documents from the configured local root instead of the remote
  /// base
  #[arg(short, long, conflicts_with = "base")]
  pub local: bool,

  /// Base address or directory to load README.md and patterns/ from
  #[arg(short, long)]
  pub base: Option<String>,
}

/// All supported subcommands for the patlib CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a route to HTML, like opening the page at `#ROUTE`.
  Render {
    /// Route key: `readme`, `patterns`, a pattern id or a heading id.
    /// Defaults to the home page.
    route: Option<String>,

    /// Print only the content container instead of the full page
    #[arg(long)]
    fragment: bool,

    #[command(flatten)]
    source: SourceArgs,
  },

  /// Print the patterns listed in the catalog.
  Catalog {
    /// Print the records as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    source: SourceArgs,
  },

  /// Show or switch the persisted light/dark theme.
  Theme {
    /// Switch to the other theme and store the choice
    #[arg(short, long)]
    toggle: bool,
  },

  /// Initialize a new patlib configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "patlib.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
