use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the patlib crate.
#[derive(Debug, Error)]
pub enum PatlibError {
  #[error("Template error: {0}")]
  Template(String),

  #[error("Failed to read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Request for {url} failed with status {status}")]
  Status { url: String, status: u16 },

  #[error("Request for {url} failed: {message}")]
  Http { url: String, message: String },

  #[error("Remote base {0} requires the `remote` feature")]
  RemoteDisabled(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),
}

impl From<tera::Error> for PatlibError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}

pub type Result<T, E = PatlibError> = std::result::Result<T, E>;
