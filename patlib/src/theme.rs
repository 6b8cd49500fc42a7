//! Light/dark display preference and the store that keeps it across runs.
use std::{
  collections::BTreeMap,
  fmt,
  fs,
  path::{Path, PathBuf},
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "theme";

/// Stored value selecting the light theme. Anything else means dark.
const LIGHT_VALUE: &str = "light";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Dark,
  Light,
}

impl Theme {
  /// Interpret a stored preference; absent or unknown values are dark.
  #[must_use]
  pub fn from_stored(value: Option<&str>) -> Self {
    if value == Some(LIGHT_VALUE) {
      Self::Light
    } else {
      Self::Dark
    }
  }

  /// Value written to the store and to the document's theme attribute.
  #[must_use]
  pub const fn stored_value(self) -> &'static str {
    match self {
      Self::Dark => "",
      Self::Light => LIGHT_VALUE,
    }
  }

  #[must_use]
  pub const fn toggled(self) -> Self {
    match self {
      Self::Dark => Self::Light,
      Self::Light => Self::Dark,
    }
  }

  /// Label of the toggle control, naming the theme it switches to.
  #[must_use]
  pub const fn toggle_label(self) -> &'static str {
    match self {
      Self::Dark => "Light",
      Self::Light => "Dark",
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Dark => f.write_str("dark"),
      Self::Light => f.write_str("light"),
    }
  }
}

/// A string key-value store that survives restarts.
pub trait PreferenceStore {
  fn get(&self, key: &str) -> Option<String>;

  /// # Errors
  ///
  /// Returns an error if the value could not be persisted.
  fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Preferences stored as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path:   PathBuf,
  values: BTreeMap<String, String>,
}

impl JsonFileStore {
  /// Open the store at `path`. A missing or unreadable file starts empty.
  #[must_use]
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let values = match fs::read_to_string(&path) {
      Ok(content) => {
        serde_json::from_str(&content).unwrap_or_else(|e| {
          warn!(
            "Ignoring malformed preferences file {}: {e}",
            path.display()
          );
          BTreeMap::new()
        })
      },
      Err(_) => BTreeMap::new(),
    };
    Self { path, values }
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl PreferenceStore for JsonFileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.values.insert(key.to_string(), value.to_string());
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
    debug!("Saved preferences to {}", self.path.display());
    Ok(())
  }
}

/// Owns the current theme and writes every change through to the store.
#[derive(Debug)]
pub struct ThemeController<S> {
  store: S,
  theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
  /// Read the preference once from `store`.
  pub fn load(store: S) -> Self {
    let theme = Theme::from_stored(store.get(THEME_KEY).as_deref());
    debug!("Loaded theme preference: {theme}");
    Self { store, theme }
  }

  #[must_use]
  pub const fn theme(&self) -> Theme {
    self.theme
  }

  /// Flip the theme and persist the new value.
  ///
  /// # Errors
  ///
  /// Returns an error if the store can't be written. The in-memory theme is
  /// switched regardless.
  pub fn toggle(&mut self) -> Result<Theme> {
    self.theme = self.theme.toggled();
    self.store.set(THEME_KEY, self.theme.stored_value())?;
    Ok(self.theme)
  }

  /// Value of the document's theme attribute.
  #[must_use]
  pub const fn document_attribute(&self) -> &'static str {
    self.theme.stored_value()
  }

  #[must_use]
  pub const fn toggle_label(&self) -> &'static str {
    self.theme.toggle_label()
  }

  #[must_use]
  pub const fn store(&self) -> &S {
    &self.store
  }
}
