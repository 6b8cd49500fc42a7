//! Loading the catalog and pattern documents from a local root or a remote
//! raw-content address.
use std::{
  collections::HashMap,
  fs,
  path::{Component, Path, PathBuf},
};

use log::debug;

use crate::error::{PatlibError, Result};

/// Path of the catalog document relative to the base.
pub const CATALOG_PATH: &str = "README.md";

/// Base used when nothing else is configured.
pub const DEFAULT_REMOTE_BASE: &str =
  "https://raw.githubusercontent.com/jackrwstevenson/agent-pattern-library/main/";

/// Path of a pattern document relative to the base.
#[must_use]
pub fn pattern_path(id: &str) -> String {
  format!("patterns/{id}.md")
}

/// Anything that can hand out the text of a document by relative path.
pub trait Fetch {
  /// Fetch the document at `path`, relative to the source's base.
  ///
  /// # Errors
  ///
  /// Returns an error if the document can't be read or the server answers
  /// with a non-success status.
  fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Where documents are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
  /// A directory on disk, the development setup.
  Local(PathBuf),
  /// A base URL ending in `/`, the production setup.
  Remote(String),
}

impl Source {
  /// Interpret a configured base: `http://` and `https://` addresses are
  /// remote, anything else is a local directory.
  #[must_use]
  pub fn from_base(base: &str) -> Self {
    if base.starts_with("http://") || base.starts_with("https://") {
      if base.ends_with('/') {
        Self::Remote(base.to_string())
      } else {
        Self::Remote(format!("{base}/"))
      }
    } else {
      Self::Local(PathBuf::from(base))
    }
  }

  /// Human readable location of `path` under this source.
  #[must_use]
  pub fn location(&self, path: &str) -> String {
    match self {
      Self::Local(root) => root.join(path).display().to_string(),
      Self::Remote(base) => format!("{base}{path}"),
    }
  }
}

impl Default for Source {
  fn default() -> Self {
    Self::Remote(DEFAULT_REMOTE_BASE.to_string())
  }
}

impl Fetch for Source {
  fn fetch_text(&self, path: &str) -> Result<String> {
    debug!("Fetching {}", self.location(path));
    match self {
      Self::Local(root) => read_local(root, path),
      Self::Remote(base) => fetch_remote(&format!("{base}{path}")),
    }
  }
}

fn read_local(root: &Path, path: &str) -> Result<String> {
  let relative = Path::new(path);
  // Route keys end up in these paths, keep them inside the root
  if relative
    .components()
    .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
  {
    return Err(PatlibError::Read {
      path:   relative.to_path_buf(),
      source: std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        "path escapes the content root",
      ),
    });
  }

  let full = root.join(relative);
  fs::read_to_string(&full).map_err(|source| {
    PatlibError::Read {
      path: full,
      source,
    }
  })
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> Result<String> {
  let mut response = ureq::get(url).call().map_err(|e| {
    match e {
      ureq::Error::StatusCode(status) => {
        PatlibError::Status {
          url: url.to_string(),
          status,
        }
      },
      other => {
        PatlibError::Http {
          url:     url.to_string(),
          message: other.to_string(),
        }
      },
    }
  })?;

  response.body_mut().read_to_string().map_err(|e| {
    PatlibError::Http {
      url:     url.to_string(),
      message: e.to_string(),
    }
  })
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> Result<String> {
  Err(PatlibError::RemoteDisabled(url.to_string()))
}

/// In-memory documents keyed by relative path. Missing paths answer like a
/// server would, with a 404.
impl Fetch for HashMap<String, String> {
  fn fetch_text(&self, path: &str) -> Result<String> {
    self.get(path).cloned().ok_or_else(|| {
      PatlibError::Status {
        url:    path.to_string(),
        status: 404,
      }
    })
  }
}

impl<F: Fetch + ?Sized> Fetch for &F {
  fn fetch_text(&self, path: &str) -> Result<String> {
    (**self).fetch_text(path)
  }
}
