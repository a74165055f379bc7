use super::observer::TailObserver;
use crate::catalog::{Book, BookPage, CatalogError, PageQuery, PAGE_SIZE};
use std::ops::Range;

/// Heading shown when no genre filter is set.
pub const ALL_GENRES_LABEL: &str = "All";

/// A page request the UI must spawn.
///
/// `generation` tags the request; a response whose generation no longer
/// matches [`Feed::generation`] is dropped by [`Feed::apply_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: PageQuery,
}

/// Coarse state of the feed, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Nothing requested yet.
    Idle,
    /// A page request is in flight.
    Fetching,
    /// Last request finished (successfully or not).
    Loaded { has_more: bool },
}

/// What [`Feed::apply_page`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Appended { added: usize },
    Failed,
    /// Response belonged to a superseded request and was discarded.
    Stale,
}

/// Paginated, append-only list of books for one genre.
///
/// A `Feed` is created every time the listing view is entered, from the
/// genre chosen on the selector screen. It owns the search term, the page
/// cursor, the accumulated books and the tail observer. It does no I/O:
/// every transition that needs a request returns a [`FetchRequest`] for the
/// caller to run, and results come back through [`apply_page`](Self::apply_page).
///
/// Invariants:
/// - the cursor only advances while `has_more` is set and nothing is in flight
/// - a search change clears the books and resets the cursor to 1 before the
///   next request is issued
/// - books are only ever appended, in response order
#[derive(Debug)]
pub struct Feed {
    category: String,
    search: String,
    page: u64,
    /// Page of the most recent successful response (0 = none yet).
    loaded_page: u64,
    books: Vec<Book>,
    has_more: bool,
    loading: bool,
    /// Set once the first request has been issued.
    started: bool,
    generation: u64,
    observer: TailObserver,
}

impl Feed {
    pub fn new(category: impl Into<String>) -> Self {
        Self::with_generation(category, 0)
    }

    /// Create a feed whose request tags continue after `generation`.
    ///
    /// The app passes the last generation of the feed it replaces, so a
    /// response still queued from that feed can never match a tag issued
    /// by this one.
    pub fn with_generation(category: impl Into<String>, generation: u64) -> Self {
        Self {
            category: category.into(),
            search: String::new(),
            page: 1,
            loaded_page: 0,
            books: Vec::new(),
            has_more: false,
            loading: false,
            started: false,
            generation,
            observer: TailObserver::new(),
        }
    }

    /// Genre name for the header, or "All" when unfiltered.
    pub fn heading(&self) -> &str {
        if self.category.is_empty() {
            ALL_GENRES_LABEL
        } else {
            &self.category
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the book the tail observer is attached to.
    pub fn observed_tail(&self) -> Option<u64> {
        self.observer.target()
    }

    pub fn state(&self) -> FeedState {
        if self.loading {
            FeedState::Fetching
        } else if !self.started {
            FeedState::Idle
        } else {
            FeedState::Loaded {
                has_more: self.has_more,
            }
        }
    }

    /// Request the first page. Called once when the listing view is mounted.
    pub fn start(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    /// Update the search term from the search box.
    ///
    /// Returns `None` if the term did not change. Otherwise the list is
    /// cleared, the cursor goes back to 1 and the returned request
    /// supersedes anything still in flight.
    pub fn set_search(&mut self, term: impl Into<String>) -> Option<FetchRequest> {
        let term = term.into();
        if term == self.search {
            return None;
        }
        tracing::debug!(search = %term, previous = %self.search, "Search term changed, clearing results");

        self.search = term;
        self.books.clear();
        self.has_more = false;
        self.page = 1;
        self.loaded_page = 0;
        self.observer.disconnect();

        Some(self.begin_fetch())
    }

    /// Apply the response for a request issued with `generation`.
    pub fn apply_page(
        &mut self,
        generation: u64,
        page: u64,
        result: Result<BookPage, CatalogError>,
    ) -> PageOutcome {
        if generation != self.generation {
            tracing::debug!(
                expected = self.generation,
                got = generation,
                page,
                "Ignoring stale page (generation mismatch)"
            );
            return PageOutcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(response) => {
                let added = response.results.len();
                self.books.extend(response.results);
                self.has_more = response.count > page.saturating_mul(PAGE_SIZE);
                self.loaded_page = page;
                self.observer.observe(self.books.last().map(|b| b.id));

                tracing::debug!(
                    page,
                    added,
                    total = self.books.len(),
                    count = response.count,
                    has_more = self.has_more,
                    "Page appended"
                );
                PageOutcome::Appended { added }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    page,
                    category = %self.category,
                    search = %self.search,
                    "Failed to fetch catalog page"
                );
                self.rewind_cursor();
                PageOutcome::Failed
            }
        }
    }

    /// The task for `generation` died without producing a response.
    pub fn abandon_fetch(&mut self, generation: u64) {
        if generation == self.generation && self.loading {
            self.loading = false;
            self.rewind_cursor();
        }
    }

    /// Report which book indices were on screen in the frame just drawn.
    ///
    /// Returns the next-page request when the tail element has just come
    /// into view, more results exist, and no request is in flight.
    pub fn report_visible(&mut self, visible: Range<usize>) -> Option<FetchRequest> {
        let tail_visible = self
            .books
            .len()
            .checked_sub(1)
            .is_some_and(|tail| visible.contains(&tail));

        if !self.observer.update(tail_visible) {
            return None;
        }
        if self.loading || !self.has_more {
            tracing::trace!(
                loading = self.loading,
                has_more = self.has_more,
                "Tail visible, trigger inert"
            );
            return None;
        }

        self.page += 1;
        tracing::debug!(page = self.page, "Tail reached, requesting next page");
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.loading = true;
        self.started = true;
        self.generation = self.generation.wrapping_add(1);
        FetchRequest {
            generation: self.generation,
            query: PageQuery::new(self.category.clone(), self.search.clone(), self.page),
        }
    }

    /// A failed page leaves the cursor on the last page that loaded, so the
    /// next tail trigger asks for the failed page again.
    fn rewind_cursor(&mut self) {
        self.page = self.loaded_page.max(1);
    }
}
