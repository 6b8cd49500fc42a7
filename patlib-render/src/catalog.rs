//! Pattern catalog extraction from the library README.
//!
//! The catalog is a plain markdown document: `### ` headings open a category
//! and every table row of the form
//! `| [Name](patterns/id.md) | Description |` becomes one [`PatternRecord`].
use std::sync::LazyLock;

use log::{debug, error, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Prefix of a line that opens a new category.
const CATEGORY_MARKER: &str = "### ";

static PATTERN_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\|\s*\[([^\]]+)\]\(patterns/([^.]+)\.md\)\s*\|\s*([^|]+)\|")
    .unwrap_or_else(|e| {
      error!("Failed to compile PATTERN_ROW_RE regex: {e}");
      utils::never_matching_regex()
    })
});

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternRecord {
  /// Filename stem of the pattern document; doubles as the route key.
  pub id:          String,
  /// Display title taken from the link text.
  pub name:        String,
  /// Trimmed text of the description column.
  pub description: String,
  /// Nearest category heading above the row, if any.
  pub category:    Option<String>,
}

/// Parse all pattern rows out of a markdown document, in document order.
///
/// Lines that don't look like a pattern row (including table headers and
/// separators) are skipped, so malformed input yields fewer records rather
/// than an error.
#[must_use]
pub fn parse_patterns(markdown: &str) -> Vec<PatternRecord> {
  let mut patterns = Vec::new();
  let mut current_category: Option<String> = None;

  for line in markdown.lines() {
    if let Some(heading) = line.strip_prefix(CATEGORY_MARKER) {
      current_category = Some(heading.trim().to_string());
      trace!("Entering category {current_category:?}");
      continue;
    }

    if let Some(caps) = PATTERN_ROW_RE.captures(line) {
      patterns.push(PatternRecord {
        id:          caps[2].to_string(),
        name:        caps[1].to_string(),
        description: caps[3].trim().to_string(),
        category:    current_category.clone(),
      });
    }
  }

  debug!("Parsed {} patterns from catalog", patterns.len());
  patterns
}

/// Return true if some record's id is exactly `id`.
#[must_use]
pub fn is_pattern(patterns: &[PatternRecord], id: &str) -> bool {
  patterns.iter().any(|p| p.id == id)
}

/// The parsed catalog, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  patterns: Vec<PatternRecord>,
}

impl Catalog {
  /// Parse a catalog from the README markdown.
  #[must_use]
  pub fn parse(markdown: &str) -> Self {
    Self {
      patterns: parse_patterns(markdown),
    }
  }

  /// An empty catalog, used when the README could not be loaded.
  #[must_use]
  pub const fn empty() -> Self {
    Self {
      patterns: Vec::new(),
    }
  }

  #[must_use]
  pub fn patterns(&self) -> &[PatternRecord] {
    &self.patterns
  }

  #[must_use]
  pub fn is_pattern(&self, id: &str) -> bool {
    is_pattern(&self.patterns, id)
  }

  /// Look up a record by id. With duplicate ids the first one wins.
  #[must_use]
  pub fn get(&self, id: &str) -> Option<&PatternRecord> {
    self.patterns.iter().find(|p| p.id == id)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}

impl From<Vec<PatternRecord>> for Catalog {
  fn from(patterns: Vec<PatternRecord>) -> Self {
    Self { patterns }
  }
}
