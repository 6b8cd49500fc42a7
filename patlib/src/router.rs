//! Fragment routing: maps the address fragment to a view, renders it into
//! the page and keeps navigation highlighting and the TOC in step.
use kuchikikiki::NodeRef;
use log::{debug, info, warn};
use patlib_render::{
  Catalog,
  MarkdownProcessor,
  dom,
  postprocess,
  toc::{self, DEFAULT_SCROLL_OFFSET},
  views::{self, HOME_KEY, INDEX_KEY, LOAD_FAILURE_HTML},
};

use crate::{
  fetch::{CATALOG_PATH, Fetch, pattern_path},
  page::{Page, ScrollBehavior, ScrollTarget},
};

/// What a route key resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Home,
  Index,
  /// A pattern document, or an unknown key that gets a fetch attempt.
  Detail(String),
  /// An element already on the page; scroll to it instead of rendering.
  Anchor(String),
}

impl Route {
  /// Resolve `key` against the catalog and the current page.
  #[must_use]
  pub fn resolve(key: &str, catalog: &Catalog, page: &Page) -> Self {
    match key {
      INDEX_KEY => Self::Index,
      HOME_KEY | "" => Self::Home,
      _ if catalog.is_pattern(key) => Self::Detail(key.to_string()),
      _ if page.has_element(key) => Self::Anchor(key.to_string()),
      _ => Self::Detail(key.to_string()),
    }
  }
}

/// Settings the router needs from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterOptions {
  /// Heading of the home page hero.
  pub site_title:     String,
  /// Viewport offset used for TOC highlighting.
  pub scroll_offset:  f64,
  /// Jump instead of animating when scrolling to anchors.
  pub reduced_motion: bool,
}

impl Default for RouterOptions {
  fn default() -> Self {
    Self {
      site_title:     "Agent Pattern Library".to_string(),
      scroll_offset:  DEFAULT_SCROLL_OFFSET,
      reduced_motion: false,
    }
  }
}

/// Drives a [`Page`] from navigation events.
#[derive(Debug)]
pub struct Router<F> {
  source:    F,
  processor: MarkdownProcessor,
  catalog:   Catalog,
  page:      Page,
  options:   RouterOptions,
}

impl<F: Fetch> Router<F> {
  #[must_use]
  pub fn new(source: F, page: Page, options: RouterOptions) -> Self {
    Self {
      source,
      processor: MarkdownProcessor::default(),
      catalog: Catalog::empty(),
      page,
      options,
    }
  }

  /// Use a differently configured markdown processor for pattern documents.
  #[must_use]
  pub fn with_processor(mut self, processor: MarkdownProcessor) -> Self {
    self.processor = processor;
    self
  }

  #[must_use]
  pub const fn page(&self) -> &Page {
    &self.page
  }

  #[must_use]
  pub const fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  #[must_use]
  pub const fn source(&self) -> &F {
    &self.source
  }

  /// Initial load: fetch the catalog, then route the current fragment.
  pub fn start(&mut self) -> Route {
    self.load_catalog();
    self.route()
  }

  /// Fetch and parse the catalog. A failure leaves an empty catalog.
  pub fn load_catalog(&mut self) {
    self.catalog = match self.source.fetch_text(CATALOG_PATH) {
      Ok(markdown) => Catalog::parse(&markdown),
      Err(e) => {
        warn!("Failed to load catalog, continuing without patterns: {e}");
        Catalog::empty()
      },
    };
    info!("Catalog holds {} patterns", self.catalog.len());
  }

  /// Change the address fragment. Routes only if the fragment changed, like
  /// a browser hash change.
  pub fn navigate(&mut self, hash: &str) -> Option<Route> {
    if self.page.location.set_hash(hash) {
      Some(self.route())
    } else {
      debug!("Fragment unchanged, not routing");
      None
    }
  }

  /// Route the current fragment.
  pub fn route(&mut self) -> Route {
    let key = self.page.location.route_key().to_string();
    let route = Route::resolve(&key, &self.catalog, &self.page);
    debug!("Routing {key:?} to {route:?}");

    if let Route::Anchor(id) = &route {
      self
        .page
        .scroll_to(ScrollTarget::Element(id.clone()), self.scroll_behavior());
      return route;
    }

    self.page.update_nav(&key, self.catalog.is_pattern(&key));
    self.render(&route);
    self.page.scroll_to(ScrollTarget::Top, ScrollBehavior::Auto);
    route
  }

  fn render(&mut self, route: &Route) {
    match route {
      Route::Index => {
        self
          .page
          .set_content_html(&views::render_patterns_list(self.catalog.patterns()));
        self.page.clear_toc();
      },
      Route::Home => {
        self.page.set_content_html(&views::render_home_page(
          self.catalog.patterns(),
          &self.options.site_title,
        ));
        self.page.clear_toc();
      },
      Route::Detail(id) => self.render_detail(id),
      Route::Anchor(_) => {},
    }
  }

  /// Fetch, convert and post-process a pattern document, then build its TOC.
  fn render_detail(&mut self, id: &str) {
    let markdown = match self.source.fetch_text(&pattern_path(id)) {
      Ok(markdown) => markdown,
      Err(e) => {
        warn!("Failed to load pattern {id:?}: {e}");
        self.page.set_content_html(LOAD_FAILURE_HTML);
        self.page.clear_toc();
        return;
      },
    };

    let document = dom::parse_fragment(&self.processor.render(&markdown));
    postprocess::apply(&document);
    let headings = toc::assign_heading_ids(&document);
    self.page.set_content(document);
    self.page.set_toc_html(&toc::build_toc_html(&headings));
    debug!("Rendered pattern {id:?} with {} headings", headings.len());
  }

  /// Handle a click inside the content container.
  ///
  /// When the clicked element, or one of its ancestors, carries
  /// `data-pattern`, the click is taken over and navigates to that pattern.
  /// Returns whether the click was handled.
  pub fn click_content(&mut self, target: &NodeRef) -> bool {
    let Some(id) = target
      .inclusive_ancestors()
      .find_map(|node| dom::attribute(&node, "data-pattern"))
    else {
      return false;
    };
    self.navigate(&id);
    true
  }

  /// Handle a click inside the TOC container: scroll to the linked heading
  /// and record it in history without re-routing. Returns whether the click
  /// was on a link.
  pub fn click_toc(&mut self, target: &NodeRef) -> bool {
    let is_link = target
      .as_element()
      .is_some_and(|el| el.name.local.as_ref() == "a");
    let Some(href) = dom::attribute(target, "href").filter(|_| is_link) else {
      return false;
    };

    let id = href.strip_prefix('#').unwrap_or(&href).to_string();
    let behavior = self.scroll_behavior();
    self.page.scroll_to(ScrollTarget::Element(id.clone()), behavior);
    self.page.location.push_state(&id);
    true
  }

  /// Handle a scroll event. `tops` holds the viewport offset of each content
  /// heading in document order. Returns the id of the highlighted heading.
  pub fn scrolled(&mut self, tops: &[f64]) -> Option<String> {
    let ids = self.page.heading_ids();
    let positions: Vec<(&str, f64)> = ids
      .iter()
      .map(String::as_str)
      .zip(tops.iter().copied())
      .collect();

    let current =
      toc::current_heading(&positions, self.options.scroll_offset)?.to_string();
    self.page.mark_toc_entry(&current);
    Some(current)
  }

  const fn scroll_behavior(&self) -> ScrollBehavior {
    ScrollBehavior::for_motion(self.options.reduced_motion)
  }
}
