use log::debug;
use patlib_render::{
  Catalog,
  views::{HOME_KEY, INDEX_KEY},
};
use serde::Serialize;
use tera::Tera;

use crate::{error::Result, page::Page, theme::Theme};

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Name the template is registered under. The `.html` suffix turns on
/// autoescaping.
const PAGE_TEMPLATE_NAME: &str = "page.html";

#[derive(Serialize)]
struct NavItem<'a> {
  page:   &'a str,
  label:  &'a str,
  active: bool,
}

/// Render the full page shell around the current state of `page`.
///
/// # Errors
///
/// Returns an error if the template fails to parse or render.
pub fn render_page(
  page: &Page,
  catalog: &Catalog,
  site_title: &str,
  theme: Theme,
) -> Result<String> {
  let mut tera = Tera::default();
  tera.add_raw_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;

  let route = page.location.route_key();
  let nav: Vec<NavItem<'_>> = page
    .nav_links()
    .iter()
    .map(|link| {
      NavItem {
        page:   &link.page,
        label:  &link.label,
        active: link.active,
      }
    })
    .collect();

  let mut tera_context = tera::Context::new();
  tera_context.insert("title", &page_title(catalog, route, site_title));
  tera_context.insert("site_title", site_title);
  tera_context.insert("route", route);
  tera_context.insert("theme", theme.stored_value());
  tera_context.insert("toggle_label", theme.toggle_label());
  tera_context.insert("nav", &nav);
  tera_context.insert("content", &page.content_html());
  tera_context.insert("toc", &page.toc_html());

  debug!("Rendering page shell for route {route:?}");
  Ok(tera.render(PAGE_TEMPLATE_NAME, &tera_context)?)
}

/// Document title for a route: the pattern name on detail pages.
fn page_title(catalog: &Catalog, route: &str, site_title: &str) -> String {
  match route {
    HOME_KEY => site_title.to_string(),
    INDEX_KEY => format!("Patterns - {site_title}"),
    id => {
      catalog.get(id).map_or_else(
        || site_title.to_string(),
        |record| format!("{} - {site_title}", record.name),
      )
    },
  }
}
