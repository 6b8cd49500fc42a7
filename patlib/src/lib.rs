//! Runtime for a markdown-described pattern library: loads the catalog,
//! routes address fragments to views, keeps the table of contents and theme
//! in step, and renders the result into a page shell.
//!
//! The `patlib` binary drives this API from the command line; the modules are
//! public so the same runtime can be embedded or tested directly.
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod html;
pub mod page;
pub mod router;
pub mod theme;

pub use error::{PatlibError, Result};
pub use fetch::{Fetch, Source};
pub use page::Page;
pub use router::{Route, Router, RouterOptions};
pub use theme::{JsonFileStore, MemoryStore, Theme, ThemeController};
