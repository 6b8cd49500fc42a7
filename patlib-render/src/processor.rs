//! Markdown to HTML conversion for pattern documents.
use comrak::{Arena, format_html, options::Options, parse_document};
use log::{error, trace};

use crate::{dom, postprocess};

/// Options controlling how pattern markdown is converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (tables, strikethrough, autolinks, ...).
  pub gfm:         bool,
  /// Pass raw HTML embedded in the markdown through to the output.
  pub unsafe_html: bool,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:         true,
      unsafe_html: true,
    }
  }
}

/// Converts pattern markdown into the HTML placed in the content container.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
  options: MarkdownOptions,
}

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render markdown to HTML without any post-processing.
  #[must_use]
  pub fn render(&self, markdown: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let mut html = String::new();
    if let Err(e) = format_html(root, &options, &mut html) {
      error!("Failed to format markdown as HTML: {e}");
      return String::new();
    }
    trace!("Rendered {} bytes of markdown to HTML", markdown.len());
    html
  }

  /// Render a pattern document and run the detail-view rewrite passes over
  /// it, returning the HTML ready for the content container.
  #[must_use]
  pub fn render_detail(&self, markdown: &str) -> String {
    let document = dom::parse_fragment(&self.render(markdown));
    postprocess::apply(&document);
    dom::serialize_fragment(&document)
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.r#unsafe = self.options.unsafe_html;
    // Heading ids are assigned by the TOC builder after rendering.
    options.extension.header_id_prefix = None;
    options
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_renders_tables_with_gfm() {
    let processor = MarkdownProcessor::default();
    let html = processor.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>1</td>"));
  }

  #[test]
  fn test_headings_have_no_generated_ids() {
    let processor = MarkdownProcessor::default();
    let html = processor.render("## When to Use\n");
    assert!(html.contains("<h2>When to Use</h2>"));
  }

  #[test]
  fn test_raw_html_follows_option() {
    let md = "<div class=\"note\">hi</div>\n";

    let passthrough = MarkdownProcessor::default().render(md);
    assert!(passthrough.contains("<div class=\"note\">hi</div>"));

    let escaped = MarkdownProcessor::new(MarkdownOptions {
      unsafe_html: false,
      ..Default::default()
    })
    .render(md);
    assert!(!escaped.contains("<div class=\"note\">"));
  }

  #[test]
  fn test_render_detail_rewrites_links_and_images() {
    let processor = MarkdownProcessor::default();
    let html = processor.render_detail(
      "See [the spike](patterns/throwaway-spike.md).\n\n![Flow](../docs/assets/flow.png)\n",
    );
    assert!(html.contains(r##"href="#throwaway-spike""##));
    assert!(html.contains(r#"data-pattern="throwaway-spike""#));
    assert!(html.contains(r#"src="assets/flow.png""#));
    assert!(html.contains(r#"src="assets/flow-dark.png""#));
  }

  #[test]
  fn test_render_detail_keeps_leading_raw_html() {
    let processor = MarkdownProcessor::default();
    let html = processor.render_detail(
      "<style>.x{}</style>\n\n## A\n\n## B\n\n<img src=\"../docs/assets/q.png\" alt=\"Q\">\n",
    );
    assert!(html.starts_with("<style>.x{}</style>"));
    assert!(html.contains("<h2>A</h2>"));
    assert!(html.contains(r#"src="assets/q-dark.png""#));
  }

  #[test]
  fn test_options_are_exposed() {
    let options = MarkdownOptions {
      gfm:         false,
      unsafe_html: true,
    };
    let processor = MarkdownProcessor::new(options.clone());
    assert_eq!(processor.options(), &options);

    let html = processor.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(!html.contains("<table>"));
  }
}
