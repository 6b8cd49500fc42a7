//! In-process model of the page the renderer drives: the address fragment,
//! the content and table-of-contents containers, the navigation links and
//! the scroll position requests.
use kuchikikiki::NodeRef;
use patlib_render::{
  dom,
  toc::{self, TOC_HEADING_SELECTOR},
  views::{HOME_KEY, INDEX_KEY},
};
use serde::{Deserialize, Serialize};

/// A navigation link carrying the route key of the page it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
  /// Route key declared on the link.
  pub page:   String,
  pub label:  String,
  #[serde(skip)]
  pub active: bool,
}

impl NavLink {
  #[must_use]
  pub fn new(page: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      page:   page.into(),
      label:  label.into(),
      active: false,
    }
  }
}

/// The links shown when no navigation is configured.
#[must_use]
pub fn default_nav() -> Vec<NavLink> {
  vec![NavLink::new(HOME_KEY, "Home"), NavLink::new(INDEX_KEY, "Patterns")]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
  Smooth,
  /// Jump without animation, used when reduced motion is requested.
  Auto,
}

impl ScrollBehavior {
  #[must_use]
  pub const fn for_motion(reduced_motion: bool) -> Self {
    if reduced_motion { Self::Auto } else { Self::Smooth }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
  Top,
  Element(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
  pub target:   ScrollTarget,
  pub behavior: ScrollBehavior,
}

/// The address fragment and the entries pushed onto history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
  hash:    String,
  history: Vec<String>,
}

impl Location {
  /// Fragment without the leading `#`.
  #[must_use]
  pub fn hash(&self) -> &str {
    &self.hash
  }

  /// Route key for the current fragment, the home key when it is empty.
  #[must_use]
  pub fn route_key(&self) -> &str {
    if self.hash.is_empty() {
      HOME_KEY
    } else {
      &self.hash
    }
  }

  /// Assign the fragment. Returns whether it changed, which is what fires a
  /// hash change.
  pub fn set_hash(&mut self, hash: &str) -> bool {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    if hash == self.hash {
      return false;
    }
    self.hash = hash.to_string();
    self.history.push(self.hash.clone());
    true
  }

  /// Push a history entry for `hash` without firing a hash change.
  pub fn push_state(&mut self, hash: &str) {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    self.hash = hash.to_string();
    self.history.push(self.hash.clone());
  }

  #[must_use]
  pub fn history(&self) -> &[String] {
    &self.history
  }
}

/// The rendered page.
#[derive(Debug, Clone)]
pub struct Page {
  pub location: Location,
  content:      NodeRef,
  toc:          NodeRef,
  nav:          Vec<NavLink>,
  last_scroll:  Option<ScrollRequest>,
}

impl Page {
  #[must_use]
  pub fn new(nav: Vec<NavLink>) -> Self {
    Self {
      location: Location::default(),
      content: dom::parse_fragment(""),
      toc: dom::parse_fragment(""),
      nav,
      last_scroll: None,
    }
  }

  /// Replace the content container with an HTML fragment.
  pub fn set_content_html(&mut self, html: &str) {
    self.content = dom::parse_fragment(html);
  }

  /// Replace the content container with an already parsed document.
  pub fn set_content(&mut self, document: NodeRef) {
    self.content = document;
  }

  #[must_use]
  pub const fn content(&self) -> &NodeRef {
    &self.content
  }

  #[must_use]
  pub fn content_html(&self) -> String {
    dom::serialize_fragment(&self.content)
  }

  pub fn set_toc_html(&mut self, html: &str) {
    self.toc = dom::parse_fragment(html);
  }

  pub fn clear_toc(&mut self) {
    self.set_toc_html("");
  }

  #[must_use]
  pub const fn toc(&self) -> &NodeRef {
    &self.toc
  }

  #[must_use]
  pub fn toc_html(&self) -> String {
    dom::serialize_fragment(&self.toc)
  }

  #[must_use]
  pub fn nav_links(&self) -> &[NavLink] {
    &self.nav
  }

  /// Recompute which navigation links are active for `route_key`.
  ///
  /// A link is active when its page is the route key, or when it is the
  /// index link and the route is a pattern.
  pub fn update_nav(&mut self, route_key: &str, is_pattern: bool) {
    for link in &mut self.nav {
      link.active =
        link.page == route_key || (link.page == INDEX_KEY && is_pattern);
    }
  }

  /// Find an element by id in the content or TOC containers.
  #[must_use]
  pub fn element_by_id(&self, id: &str) -> Option<NodeRef> {
    dom::element_by_id(&self.content, id)
      .or_else(|| dom::element_by_id(&self.toc, id))
  }

  #[must_use]
  pub fn has_element(&self, id: &str) -> bool {
    self.element_by_id(id).is_some()
  }

  /// Scroll the window. Scrolling to an element that doesn't exist does
  /// nothing and returns `false`.
  pub fn scroll_to(
    &mut self,
    target: ScrollTarget,
    behavior: ScrollBehavior,
  ) -> bool {
    if let ScrollTarget::Element(id) = &target {
      if !self.has_element(id) {
        return false;
      }
    }
    self.last_scroll = Some(ScrollRequest { target, behavior });
    true
  }

  #[must_use]
  pub const fn last_scroll(&self) -> Option<&ScrollRequest> {
    self.last_scroll.as_ref()
  }

  /// Ids of the content headings taking part in the TOC, in document order.
  #[must_use]
  pub fn heading_ids(&self) -> Vec<String> {
    self
      .content
      .select(TOC_HEADING_SELECTOR)
      .map(|headings| {
        headings
          .filter_map(|h| dom::attribute(h.as_node(), "id"))
          .collect()
      })
      .unwrap_or_default()
  }

  /// Highlight the TOC entry of the heading with the given id.
  pub fn mark_toc_entry(&self, id: &str) {
    toc::mark_active_entry(&self.toc, id);
  }
}

impl Default for Page {
  fn default() -> Self {
    Self::new(default_nav())
  }
}
