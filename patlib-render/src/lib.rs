//! # patlib-render
//!
//! Rendering core for the pattern library: everything that turns fetched
//! markdown into the HTML shown in the content and table-of-contents
//! containers, with no I/O of its own.
//!
//! ## Quick Start
//!
//! ```rust
//! use patlib_render::{Catalog, MarkdownOptions, MarkdownProcessor, views};
//!
//! let readme = "### Grounding\n\
//!               | [Context Library](patterns/context-library.md) | Reference material. |";
//! let catalog = Catalog::parse(readme);
//! assert!(catalog.is_pattern("context-library"));
//!
//! let home = views::render_home_page(catalog.patterns(), "Agent Pattern Library");
//! assert!(home.contains(r#"data-pattern="context-library""#));
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let html = processor.render_detail("## Intro\n\nSee [spike](patterns/throwaway-spike.md).");
//! assert!(html.contains(r##"href="#throwaway-spike""##));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: pattern table parsing and lookup
//! - [`processor`]: markdown to HTML conversion via `comrak`
//! - [`dom`]: fragment parsing, serialization and attribute/class helpers
//! - [`postprocess`]: link and theme-image rewriting on a parsed DOM
//! - [`toc`]: heading ids, table of contents and scroll highlighting
//! - [`views`]: home and index views
//! - [`utils`]: slug generation and regex helpers

pub mod catalog;
pub mod dom;
pub mod postprocess;
pub mod processor;
pub mod toc;
pub mod utils;
pub mod views;

pub use crate::{
  catalog::{Catalog, PatternRecord, is_pattern, parse_patterns},
  processor::{MarkdownOptions, MarkdownProcessor},
  toc::{Heading, HeadingLevel},
  utils::slugify,
};
