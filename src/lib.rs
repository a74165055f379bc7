//! Terminal browser for the Project Gutenberg book catalog.
//!
//! - `catalog`: HTTP client and wire types for the paginated books endpoint
//! - `feed`: the infinite-scroll result list and its tail observer
//! - `app`: application state shared by the UI
//! - `ui`: ratatui front end and event loop

pub mod app;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod ui;
pub mod util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
