//! Paginated result feed: the infinite-scroll controller behind the book list.
//!
//! - [`Feed`] - search term, page cursor, accumulated books, stale-response
//!   filtering by generation
//! - [`TailObserver`] - single-target "tail element entered the viewport"
//!   detection
//!
//! The feed performs no I/O. The UI spawns the [`FetchRequest`]s it returns
//! and hands the responses back through [`Feed::apply_page`].

mod observer;
mod state;

pub use observer::TailObserver;
pub use state::{Feed, FeedState, FetchRequest, PageOutcome, ALL_GENRES_LABEL};
