#![allow(clippy::expect_used, reason = "Fine in tests")]
use patlib_render::{
  Catalog,
  MarkdownOptions,
  MarkdownProcessor,
  dom,
  postprocess,
  toc,
  views,
};

const CATALOG: &str = r"# Agent Pattern Library

An index of patterns.

| Pattern | Description |
|---------|-------------|

### Grounding

| Pattern | Description |
|---------|-------------|
| [Throwaway Spike](patterns/throwaway-spike.md) | Build to learn, then discard. |
| [Context Primer](patterns/context-primer.md) | Load the repo before asking. |

### Workflow

| Pattern | Description |
|---------|-------------|
| [Plan Then Act](patterns/plan-then-act.md) | Agree on a plan first. | extra |

### Appendix

| [Odd One](patterns/odd-one.md) | Kept out of the home page. |
";

const PATTERN: &str = r"# Throwaway Spike

Write the spike, learn from it, then delete it. See also
[Plan Then Act](patterns/plan-then-act.md) and the
[upstream notes](https://example.com/notes.md).

![Spike lifecycle](../docs/assets/spike-lifecycle.png)

## When to use

When the unknowns outweigh the knowns.

### Warning signs

The spike starts getting tests.

## How it works

| Step | Action |
|------|--------|
| 1    | Spike  |
";

#[test]
fn test_catalog_from_readme() {
  let catalog = Catalog::parse(CATALOG);

  let ids: Vec<&str> = catalog.patterns().iter().map(|p| p.id.as_str()).collect();
  assert_eq!(
    ids,
    ["throwaway-spike", "context-primer", "plan-then-act", "odd-one"]
  );

  let plan = catalog.get("plan-then-act").expect("plan-then-act parsed");
  assert_eq!(plan.description, "Agree on a plan first.");
  assert_eq!(plan.category.as_deref(), Some("Workflow"));
  assert!(!catalog.is_pattern("Throwaway-Spike"));
}

#[test]
fn test_home_view_groups_known_categories() {
  let catalog = Catalog::parse(CATALOG);
  let html = views::render_home_page(catalog.patterns(), "Agent Pattern Library");

  let grounding = html.find("<h2>Grounding</h2>").expect("grounding section");
  let workflow = html.find("<h2>Workflow</h2>").expect("workflow section");
  assert!(grounding < workflow);
  assert!(!html.contains("<h2>Scale</h2>"));
  assert!(!html.contains("odd-one"));
  assert_eq!(html.matches(r#"class="pattern-card""#).count(), 3);
}

#[test]
fn test_detail_pipeline() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let document = dom::parse_fragment(&processor.render(PATTERN));
  postprocess::apply(&document);
  let headings = toc::assign_heading_ids(&document);

  let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
  assert_eq!(ids, ["when-to-use", "warning-signs", "how-it-works"]);
  assert!(dom::element_by_id(&document, "warning-signs").is_some());

  let internal = document
    .select_first(r#"a[data-pattern="plan-then-act"]"#)
    .expect("pattern link rewritten");
  assert_eq!(
    dom::attribute(internal.as_node(), "href").as_deref(),
    Some("#plan-then-act")
  );

  let external = document
    .select_first(r#"a[href="https://example.com/notes.md"]"#)
    .expect("external link kept");
  assert!(dom::attribute(external.as_node(), "data-pattern").is_none());

  let light = document
    .select_first("img.light-only")
    .expect("light image");
  assert_eq!(
    dom::attribute(light.as_node(), "src").as_deref(),
    Some("assets/spike-lifecycle.png")
  );
  let dark = document.select_first("img.dark-only").expect("dark image");
  assert_eq!(
    dom::attribute(dark.as_node(), "src").as_deref(),
    Some("assets/spike-lifecycle-dark.png")
  );
  assert_eq!(
    dom::attribute(dark.as_node(), "alt").as_deref(),
    Some("Spike lifecycle")
  );

  assert!(document.select_first("table").is_ok());

  let toc_html = toc::build_toc_html(&headings);
  assert!(toc_html.starts_with("<h4>On this page</h4><ul>"));
  assert!(toc_html.contains(r##"<li class="h3"><a href="#warning-signs">Warning signs</a></li>"##));
}

#[test]
fn test_render_detail_is_stable() {
  let processor = MarkdownProcessor::default();
  let once = processor.render_detail(PATTERN);
  let twice = postprocess::postprocess_detail(&once);
  assert_eq!(once, twice);
  assert_eq!(once.matches("dark-only").count(), 1);
}

#[test]
fn test_toc_highlighting_follows_scroll() {
  let toc_doc = dom::parse_fragment(&toc::build_toc_html(&[
    toc::Heading::new("When to use", toc::HeadingLevel::H2),
    toc::Heading::new("How it works", toc::HeadingLevel::H2),
  ]));

  let positions = [("when-to-use", -40.0), ("how-it-works", 80.0)];
  let current = toc::current_heading(&positions, toc::DEFAULT_SCROLL_OFFSET)
    .expect("a current heading");
  assert_eq!(current, "how-it-works");

  toc::mark_active_entry(&toc_doc, current);
  let active: Vec<String> = toc_doc
    .select("a.active")
    .expect("valid selector")
    .filter_map(|a| dom::attribute(a.as_node(), "href"))
    .collect();
  assert_eq!(active, ["#how-it-works"]);
}
