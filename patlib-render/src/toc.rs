//! On-page navigation built from the headings of the rendered content.
use std::fmt::{self, Write};

use html_escape::{encode_double_quoted_attribute, encode_text};
use kuchikikiki::NodeRef;
use serde::{Deserialize, Serialize};

use crate::{dom, utils::slugify};

/// Headings that take part in the table of contents.
pub const TOC_HEADING_SELECTOR: &str = "h2, h3, h4";

/// Distance from the top of the viewport, in CSS pixels, at which a heading
/// counts as the one being read.
pub const DEFAULT_SCROLL_OFFSET: f64 = 100.0;

/// Class toggled on the TOC link of the current heading.
pub const ACTIVE_CLASS: &str = "active";

/// Heading level of a TOC entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
  H2,
  H3,
  H4,
}

impl HeadingLevel {
  /// Map an element tag name to a level, `None` for anything but h2..h4.
  #[must_use]
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag.to_ascii_lowercase().as_str() {
      "h2" => Some(Self::H2),
      "h3" => Some(Self::H3),
      "h4" => Some(Self::H4),
      _ => None,
    }
  }

  /// Lowercase tag name, used as the TOC item class.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
    }
  }
}

impl fmt::Display for HeadingLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A heading found in the rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
  /// Text content of the heading element.
  pub text:  String,
  pub level: HeadingLevel,
  /// Slug of `text`, also written to the element's `id`.
  pub id:    String,
}

impl Heading {
  #[must_use]
  pub fn new(text: impl Into<String>, level: HeadingLevel) -> Self {
    let text = text.into();
    let id = slugify(&text);
    Self { text, level, id }
  }
}

/// Collect the h2..h4 headings of `document` in document order and set each
/// element's `id` to the slug of its text.
#[must_use]
pub fn assign_heading_ids(document: &NodeRef) -> Vec<Heading> {
  let Ok(elements) = document.select(TOC_HEADING_SELECTOR) else {
    return Vec::new();
  };

  let mut headings = Vec::new();
  for element in elements {
    let Some(level) = HeadingLevel::from_tag(&element.name.local) else {
      continue;
    };
    let node = element.as_node();
    let heading = Heading::new(node.text_contents(), level);
    dom::set_attribute(node, "id", heading.id.clone());
    headings.push(heading);
  }
  headings
}

/// Render the table of contents for `headings`.
///
/// Returns an empty string for fewer than two headings; a single-entry TOC
/// is not worth showing.
#[must_use]
pub fn build_toc_html(headings: &[Heading]) -> String {
  if headings.len() < 2 {
    return String::new();
  }

  let mut toc = String::from("<h4>On this page</h4><ul>");
  for heading in headings {
    // Writing into a String cannot fail
    let _ = write!(
      toc,
      r##"<li class="{}"><a href="#{}">{}</a></li>"##,
      heading.level,
      encode_double_quoted_attribute(&slugify(&heading.text)),
      encode_text(&heading.text),
    );
  }
  toc.push_str("</ul>");
  toc
}

/// Pick the heading being read given each heading's distance from the top of
/// the viewport, in document order.
///
/// Starts at the first heading and moves to every later heading whose top is
/// at or above `threshold`, so the last such heading wins.
#[must_use]
pub fn current_heading<'a>(
  positions: &[(&'a str, f64)],
  threshold: f64,
) -> Option<&'a str> {
  let (first, _) = positions.first()?;
  let mut current = *first;
  for (id, top) in positions {
    if *top <= threshold {
      current = *id;
    }
  }
  Some(current)
}

/// Mark only the TOC link pointing at `#id` as active.
pub fn mark_active_entry(toc: &NodeRef, id: &str) {
  let Ok(links) = toc.select("a") else {
    return;
  };
  let target = format!("#{id}");
  for link in links {
    let node = link.as_node();
    let is_current = dom::attribute(node, "href").as_deref() == Some(target.as_str());
    dom::toggle_class(node, ACTIVE_CLASS, is_current);
  }
}
