use thiserror::Error;

/// Errors raised while picking a configuration template.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),
}

/// Default configuration in TOML, with every field explained.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# patlib configuration file

# Where README.md and patterns/*.md are loaded from. An http(s) address is
# fetched over the network, anything else is read as a directory.
base = "https://raw.githubusercontent.com/jackrwstevenson/agent-pattern-library/main/"

# Directory used instead of `base` when running with --local
local_root = "."

# Title shown in the home page hero
title = "Agent Pattern Library"

# Pixels from the top of the viewport at which a heading becomes current in
# the table of contents
scroll_offset = 100

# Jump to anchors instead of scrolling smoothly
reduced_motion = false

# Where the theme preference is stored (defaults to the XDG state directory)
# preferences_path = "preferences.json"

# Navigation links. `page` is the route key the link opens.
[[nav]]
page = "readme"
label = "Home"

[[nav]]
page = "patterns"
label = "Patterns"
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "base": "https://raw.githubusercontent.com/jackrwstevenson/agent-pattern-library/main/",
  "local_root": ".",
  "title": "Agent Pattern Library",
  "scroll_offset": 100,
  "reduced_motion": false,
  "nav": [
    { "page": "readme", "label": "Home" },
    { "page": "patterns", "label": "Patterns" }
  ]
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for anything but `toml` and
/// `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
