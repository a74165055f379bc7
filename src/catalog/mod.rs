//! Remote book catalog access.
//!
//! - [`client`] - HTTP requests for one page of search results
//! - [`types`] - wire types and the catalog error enum
//! - [`display`] - pure per-book display rules (author names, viewable link)

mod client;
pub mod display;
mod types;

pub use client::{CatalogClient, DEFAULT_BASE_URL};
pub use types::{Author, Book, BookPage, CatalogError, PageQuery, PAGE_SIZE};
