//! DOM rewrite passes applied to a pattern's rendered HTML before it is shown.
//!
//! Pattern documents link to each other as `patterns/<id>.md` and embed
//! diagrams as `../docs/assets/<name>.png`, which only make sense on the
//! repository host. These passes turn the former into in-page route links and
//! give every PNG a dark-theme twin.
//!
//! Both passes are idempotent: running them twice over the same document
//! leaves it as the first run did.
use std::sync::LazyLock;

use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use log::{debug, error};
use markup5ever::{QualName, local_name, ns};
use regex::Regex;

use crate::{dom, utils};

/// Class marking the light-theme variant of an image.
pub const LIGHT_ONLY_CLASS: &str = "light-only";
/// Class marking the dark-theme variant of an image.
pub const DARK_ONLY_CLASS: &str = "dark-only";

static PATTERN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?:patterns/)?([^/.]+)\.md$").unwrap_or_else(|e| {
    error!("Failed to compile PATTERN_LINK_RE regex: {e}");
    utils::never_matching_regex()
  })
});

static DOCS_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\.\./)?docs/").unwrap_or_else(|e| {
    error!("Failed to compile DOCS_PREFIX_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Run every detail-view pass over `document`.
pub fn apply(document: &NodeRef) {
  rewrite_pattern_links(document);
  rewrite_theme_images(document);
}

/// Post-process a detail-view HTML fragment and return the rewritten fragment.
#[must_use]
pub fn postprocess_detail(html: &str) -> String {
  let document = dom::parse_fragment(html);
  apply(&document);
  dom::serialize_fragment(&document)
}

/// Point relative `.md` links at the in-page route of the linked pattern.
///
/// `patterns/throwaway-spike.md` becomes `#throwaway-spike` with
/// `data-pattern="throwaway-spike"`. Scheme-qualified links stay as they are.
pub fn rewrite_pattern_links(document: &NodeRef) {
  let Ok(links) = document.select(r#"a[href$=".md"]"#) else {
    return;
  };

  // Collect first, the selection borrows the tree we are about to modify
  let links: Vec<NodeRef> = links.map(|link| link.as_node().clone()).collect();
  let mut rewritten = 0usize;

  for link in links {
    let Some(href) = dom::attribute(&link, "href") else {
      continue;
    };
    if utils::is_scheme_qualified(&href) {
      continue;
    }
    let Some(stem) = PATTERN_LINK_RE
      .captures(&href)
      .map(|caps| caps[1].to_string())
    else {
      continue;
    };

    dom::set_attribute(&link, "href", format!("#{stem}"));
    dom::set_attribute(&link, "data-pattern", stem);
    rewritten += 1;
  }

  debug!("Rewrote {rewritten} pattern links");
}

/// Give every PNG image a dark-theme sibling.
///
/// The original element keeps its alt text, loses a leading `docs/` or
/// `../docs/` and is tagged [`LIGHT_ONLY_CLASS`]; right after it a new `img`
/// pointing at `<name>-dark.png` is inserted with [`DARK_ONLY_CLASS`].
/// Images that already carry either class are skipped.
pub fn rewrite_theme_images(document: &NodeRef) {
  let Ok(images) = document.select(r#"img[src$=".png"]"#) else {
    return;
  };

  let images: Vec<NodeRef> =
    images.map(|img| img.as_node().clone()).collect();
  let mut duplicated = 0usize;

  for img in images {
    if dom::has_class(&img, LIGHT_ONLY_CLASS)
      || dom::has_class(&img, DARK_ONLY_CLASS)
    {
      continue;
    }
    let Some(src) = dom::attribute(&img, "src") else {
      continue;
    };

    let src = DOCS_PREFIX_RE.replace(&src, "").into_owned();
    let alt = dom::attribute(&img, "alt").unwrap_or_default();
    let dark_src = dark_variant(&src);

    dom::set_attribute(&img, "src", src);
    dom::add_class(&img, LIGHT_ONLY_CLASS);
    img.insert_after(new_image(dark_src, alt, DARK_ONLY_CLASS));
    duplicated += 1;
  }

  debug!("Added {duplicated} dark-theme images");
}

/// `assets/diagram.png` -> `assets/diagram-dark.png`.
fn dark_variant(src: &str) -> String {
  src
    .strip_suffix(".png")
    .map_or_else(|| src.to_string(), |stem| format!("{stem}-dark.png"))
}

fn new_image(src: String, alt: String, class: &str) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), local_name!("img")),
    vec![
      (ExpandedName::new("", "src"), Attribute {
        prefix: None,
        value:  src,
      }),
      (ExpandedName::new("", "alt"), Attribute {
        prefix: None,
        value:  alt,
      }),
      (ExpandedName::new("", "class"), Attribute {
        prefix: None,
        value:  class.to_string(),
      }),
    ],
  )
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;

  fn images(document: &NodeRef) -> Vec<NodeRef> {
    document
      .select("img")
      .unwrap()
      .map(|img| img.as_node().clone())
      .collect()
  }

  #[test]
  fn test_pattern_link_is_rewritten() {
    let document = dom::parse_fragment(
      r#"<p><a href="patterns/throwaway-spike.md">Spike</a></p>"#,
    );
    rewrite_pattern_links(&document);

    let link = document.select_first("a").unwrap();
    let link = link.as_node();
    assert_eq!(
      dom::attribute(link, "href").as_deref(),
      Some("#throwaway-spike")
    );
    assert_eq!(
      dom::attribute(link, "data-pattern").as_deref(),
      Some("throwaway-spike")
    );
  }

  #[test]
  fn test_bare_and_nested_md_links() {
    let document = dom::parse_fragment(
      r#"<a href="context-library.md">A</a><a href="../patterns/spec-library.md">B</a>"#,
    );
    rewrite_pattern_links(&document);

    let hrefs: Vec<_> = document
      .select("a")
      .unwrap()
      .filter_map(|a| dom::attribute(a.as_node(), "href"))
      .collect();
    assert_eq!(hrefs, vec!["#context-library", "#spec-library"]);
  }

  #[test]
  fn test_absolute_links_are_untouched() {
    let html = r#"<a href="https://example.com">Site</a><a href="https://example.com/guide.md">Guide</a>"#;
    let document = dom::parse_fragment(html);
    rewrite_pattern_links(&document);

    for link in document.select("a").unwrap() {
      let link = link.as_node();
      assert!(
        dom::attribute(link, "href")
          .is_some_and(|h| h.starts_with("https://"))
      );
      assert!(dom::attribute(link, "data-pattern").is_none());
    }
  }

  #[test]
  fn test_theme_image_gets_dark_sibling() {
    let document = dom::parse_fragment(
      r#"<p><img src="../docs/assets/diagram.png" alt="Flow diagram"></p>"#,
    );
    rewrite_theme_images(&document);

    let imgs = images(&document);
    assert_eq!(imgs.len(), 2);

    let (light, dark) = (&imgs[0], &imgs[1]);
    assert_eq!(dom::attribute(light, "src").as_deref(), Some("assets/diagram.png"));
    assert!(dom::has_class(light, LIGHT_ONLY_CLASS));
    assert_eq!(
      dom::attribute(dark, "src").as_deref(),
      Some("assets/diagram-dark.png")
    );
    assert!(dom::has_class(dark, DARK_ONLY_CLASS));
    assert_eq!(dom::attribute(light, "alt").as_deref(), Some("Flow diagram"));
    assert_eq!(dom::attribute(dark, "alt").as_deref(), Some("Flow diagram"));

    // The twin sits immediately after the original
    assert_eq!(light.next_sibling().as_ref(), Some(dark));
  }

  #[test]
  fn test_docs_prefix_without_parent_dir() {
    let document =
      dom::parse_fragment(r#"<img src="docs/assets/chart.png" alt="">"#);
    rewrite_theme_images(&document);

    let imgs = images(&document);
    assert_eq!(dom::attribute(&imgs[0], "src").as_deref(), Some("assets/chart.png"));
    assert_eq!(
      dom::attribute(&imgs[1], "src").as_deref(),
      Some("assets/chart-dark.png")
    );
  }

  #[test]
  fn test_non_png_images_are_untouched() {
    let html = r#"<img src="../docs/assets/photo.jpg" alt="Photo">"#;
    let document = dom::parse_fragment(html);
    rewrite_theme_images(&document);

    let imgs = images(&document);
    assert_eq!(imgs.len(), 1);
    assert_eq!(
      dom::attribute(&imgs[0], "src").as_deref(),
      Some("../docs/assets/photo.jpg")
    );
    assert!(dom::attribute(&imgs[0], "class").is_none());
  }

  #[test]
  fn test_missing_alt_becomes_empty() {
    let document = dom::parse_fragment(r#"<img src="assets/x.png">"#);
    rewrite_theme_images(&document);

    let imgs = images(&document);
    assert_eq!(dom::attribute(&imgs[1], "alt").as_deref(), Some(""));
  }

  #[test]
  fn test_passes_are_idempotent() {
    let html = r#"<p><a href="patterns/a.md">A</a> <img src="../docs/assets/d.png" alt="D"></p>"#;
    let once = postprocess_detail(html);
    let twice = postprocess_detail(&once);
    assert_eq!(once, twice);
    assert_eq!(once.matches("<img").count(), 2);
  }

  #[test]
  fn test_dark_variant() {
    assert_eq!(dark_variant("assets/a.png"), "assets/a-dark.png");
    assert_eq!(dark_variant("a.png.png"), "a.png-dark.png");
  }
}
