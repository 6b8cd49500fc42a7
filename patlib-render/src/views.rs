//! The catalog-driven views: home page and pattern index.
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::catalog::PatternRecord;

/// Route key of the home view.
pub const HOME_KEY: &str = "readme";

/// Route key of the pattern index.
pub const INDEX_KEY: &str = "patterns";

/// Categories shown on the home page, in display order. Records in any other
/// category are left off the home page but can still be opened directly.
pub const HOME_CATEGORIES: [&str; 4] =
  ["Grounding", "Workflow", "Scale", "Evolution"];

/// Content shown when a pattern document can't be loaded.
pub const LOAD_FAILURE_HTML: &str = "<p>Failed to load content</p>";

const HERO_SUBTITLE: &str =
  "Emerging patterns in AI-assisted software development";

const HERO_DESCRIPTION: &str = "An attempt to make sense of emerging patterns \
                                in AI-assisted software development, drawn \
                                from research, personal observations and \
                                experiments.";

/// Render the home page: a hero block followed by one card grid per known
/// category that has at least one pattern.
#[must_use]
pub fn render_home_page(patterns: &[PatternRecord], title: &str) -> String {
  let mut html = format!(
    r#"<div class="hero"><h1>{}</h1><p class="hero-subtitle">{HERO_SUBTITLE}</p><p class="hero-description">{HERO_DESCRIPTION}</p></div>"#,
    encode_text(title)
  );

  for category in HOME_CATEGORIES {
    let items: Vec<&PatternRecord> = patterns
      .iter()
      .filter(|p| p.category.as_deref() == Some(category))
      .collect();
    if items.is_empty() {
      continue;
    }

    let _ = write!(
      html,
      r#"<section class="pattern-category"><h2>{category}</h2><div class="pattern-grid">"#
    );
    for pattern in items {
      html.push_str(&render_card(pattern));
    }
    html.push_str("</div></section>");
  }

  html
}

fn render_card(pattern: &PatternRecord) -> String {
  let id = encode_double_quoted_attribute(&pattern.id);
  let alt = encode_double_quoted_attribute(&pattern.name);
  format!(
    concat!(
      r##"<a href="#{id}" class="pattern-card" data-pattern="{id}">"##,
      r#"<div class="pattern-card-content"><h3>{name}</h3></div>"#,
      r#"<div class="pattern-card-image">"#,
      r#"<img src="assets/thumbs/{id}.png" alt="{alt}" class="light-only">"#,
      r#"<img src="assets/thumbs/{id}-dark.png" alt="{alt}" class="dark-only">"#,
      r#"</div>"#,
      r#"<div class="pattern-card-content"><p>{description}</p></div>"#,
      r#"</a>"#,
    ),
    id = id,
    alt = alt,
    name = encode_text(&pattern.name),
    description = encode_text(&pattern.description),
  )
}

/// Render the flat pattern index, every record regardless of category.
#[must_use]
pub fn render_patterns_list(patterns: &[PatternRecord]) -> String {
  let mut html = String::from(r#"<h1>Patterns</h1><ul class="patterns">"#);
  for pattern in patterns {
    let id = encode_double_quoted_attribute(&pattern.id);
    let _ = write!(
      html,
      r##"<li><a href="#{id}" data-pattern="{id}">{}</a><small>{}</small></li>"##,
      encode_text(&pattern.name),
      encode_text(&pattern.description),
    );
  }
  html.push_str("</ul>");
  html
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: &str, name: &str, category: Option<&str>) -> PatternRecord {
    PatternRecord {
      id:          id.to_string(),
      name:        name.to_string(),
      description: format!("About {name}"),
      category:    category.map(str::to_string),
    }
  }

  #[test]
  fn test_patterns_list() {
    let patterns = [
      record("throwaway-spike", "Throwaway Spike", Some("Workflow")),
      record("context-library", "Context Library", None),
    ];
    let html = render_patterns_list(&patterns);

    assert!(html.starts_with(r#"<h1>Patterns</h1><ul class="patterns">"#));
    assert!(html.contains(r#"data-pattern="throwaway-spike""#));
    assert!(html.contains("Throwaway Spike"));
    assert!(html.contains(r#"data-pattern="context-library""#));
    assert!(html.contains("<small>About Context Library</small>"));
  }

  #[test]
  fn test_home_groups_in_fixed_order() {
    let patterns = [
      record("spike", "Spike", Some("Workflow")),
      record("library", "Library", Some("Grounding")),
      record("fleet", "Fleet", Some("Scale")),
    ];
    let html = render_home_page(&patterns, "Agent Pattern Library");

    let grounding = html.find("<h2>Grounding</h2>").unwrap_or(usize::MAX);
    let workflow = html.find("<h2>Workflow</h2>").unwrap_or(usize::MAX);
    let scale = html.find("<h2>Scale</h2>").unwrap_or(usize::MAX);
    assert!(grounding < workflow && workflow < scale && scale < usize::MAX);
    assert!(!html.contains("<h2>Evolution</h2>"));
    assert!(html.contains("<h1>Agent Pattern Library</h1>"));
  }

  #[test]
  fn test_home_drops_unknown_and_missing_categories() {
    let patterns = [
      record("orphan", "Orphan", None),
      record("odd", "Odd", Some("Miscellany")),
      record("library", "Library", Some("Grounding")),
    ];
    let html = render_home_page(&patterns, "Library");

    assert!(html.contains(r#"data-pattern="library""#));
    assert!(!html.contains("orphan"));
    assert!(!html.contains("Miscellany"));
  }

  #[test]
  fn test_home_card_has_both_thumbnails() {
    let patterns = [record("spike", "Spike", Some("Workflow"))];
    let html = render_home_page(&patterns, "Library");

    assert!(html.contains(r##"<a href="#spike" class="pattern-card" data-pattern="spike">"##));
    assert!(html.contains(
      r#"<img src="assets/thumbs/spike.png" alt="Spike" class="light-only">"#
    ));
    assert!(html.contains(
      r#"<img src="assets/thumbs/spike-dark.png" alt="Spike" class="dark-only">"#
    ));
  }

  #[test]
  fn test_views_escape_catalog_text() {
    let patterns = [PatternRecord {
      id:          "a-b".into(),
      name:        "Fish & Chips".into(),
      description: "Use <b>carefully</b>".into(),
      category:    Some("Scale".into()),
    }];

    let list = render_patterns_list(&patterns);
    assert!(list.contains("Fish &amp; Chips"));
    assert!(list.contains("Use &lt;b&gt;carefully&lt;/b&gt;"));

    let home = render_home_page(&patterns, "T");
    assert!(home.contains("<h3>Fish &amp; Chips</h3>"));
  }
}
