//! Small helpers over `kuchikikiki` documents shared by the rewrite passes,
//! the TOC builder and the page model.
use kuchikikiki::NodeRef;
use log::error;
use markup5ever::{QualName, local_name, ns};
use tendril::TendrilSink;

/// Parse an HTML fragment as if it were assigned to a `<body>` element's
/// `innerHTML`. Leading `<style>`, `<meta>` and similar elements stay where
/// they are instead of moving into a synthesized `<head>`.
#[must_use]
pub fn parse_fragment(html: &str) -> NodeRef {
  let context = QualName::new(None, ns!(html), local_name!("body"));
  kuchikikiki::parse_fragment(context, Vec::new()).one(html)
}

/// Serialize a document produced by [`parse_fragment`] without the `<html>`
/// root the fragment parser wraps around it.
#[must_use]
pub fn serialize_fragment(document: &NodeRef) -> String {
  let Some(root) = document
    .children()
    .find(|node| node.as_element().is_some())
  else {
    return String::new();
  };

  let mut out = Vec::new();
  for child in root.children() {
    if let Err(e) = child.serialize(&mut out) {
      error!("Failed to serialize HTML fragment: {e}");
      return String::new();
    }
  }
  String::from_utf8(out).unwrap_or_default()
}

/// Read an attribute of an element node.
#[must_use]
pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
  node
    .as_element()
    .and_then(|el| el.attributes.borrow().get(name).map(ToString::to_string))
}

/// Set an attribute on an element node. Non-elements are left alone.
pub fn set_attribute(node: &NodeRef, name: &str, value: impl Into<String>) {
  if let Some(el) = node.as_element() {
    el.attributes.borrow_mut().insert(name, value.into());
  }
}

/// Whether the element's `class` attribute contains `class`.
#[must_use]
pub fn has_class(node: &NodeRef, class: &str) -> bool {
  attribute(node, "class")
    .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

/// Add `class` to the element's class list if it isn't there yet.
pub fn add_class(node: &NodeRef, class: &str) {
  if has_class(node, class) {
    return;
  }
  let classes = match attribute(node, "class") {
    Some(existing) if !existing.trim().is_empty() => {
      format!("{} {class}", existing.trim())
    },
    _ => class.to_string(),
  };
  set_attribute(node, "class", classes);
}

/// Remove `class` from the element's class list.
pub fn remove_class(node: &NodeRef, class: &str) {
  let Some(existing) = attribute(node, "class") else {
    return;
  };
  let remaining: Vec<&str> = existing
    .split_whitespace()
    .filter(|c| *c != class)
    .collect();
  if remaining.is_empty() {
    if let Some(el) = node.as_element() {
      el.attributes.borrow_mut().remove("class");
    }
  } else {
    set_attribute(node, "class", remaining.join(" "));
  }
}

/// Add or remove `class` depending on `enabled`.
pub fn toggle_class(node: &NodeRef, class: &str, enabled: bool) {
  if enabled {
    add_class(node, class);
  } else {
    remove_class(node, class);
  }
}

/// Find the first element whose `id` attribute equals `id`.
#[must_use]
pub fn element_by_id(document: &NodeRef, id: &str) -> Option<NodeRef> {
  document.inclusive_descendants().find(|node| {
    node
      .as_element()
      .is_some_and(|el| el.attributes.borrow().get("id") == Some(id))
  })
}
