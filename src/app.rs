use crate::catalog::{Book, BookPage, CatalogClient, CatalogError};
use crate::feed::{Feed, FetchRequest};
use std::borrow::Cow;
use std::ops::Range;
use tokio::time::Instant;

/// Genres offered on the selector screen, in display order.
pub const GENRES: &[&str] = &[
    "Fiction",
    "Drama",
    "Humour",
    "Politics",
    "Philosophy",
    "History",
    "Adventure",
];

pub const CATALOG_TITLE: &str = "Gutenberg Project";
pub const CATALOG_BLURB: &str = "A social cataloging website that allows you to freely search \
     its database of books, annotations, and reviews.";

/// Position of `name` in [`GENRES`], ignoring ASCII case and surrounding
/// whitespace.
pub fn genre_index(name: &str) -> Option<usize> {
    let name = name.trim();
    GENRES.iter().position(|g| g.eq_ignore_ascii_case(name))
}

/// Rows moved by PageUp/PageDown in the book list.
const PAGE_JUMP: usize = 5;

// ============================================================================
// View and Event Types
// ============================================================================

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Genre selector (root screen).
    Genres,
    /// Book listing for the selected genre.
    Books,
}

/// Events from background tasks
pub enum AppEvent {
    /// A page request finished.
    ///
    /// Fields:
    /// - `generation`: feed generation the request was issued under
    /// - `page`: 1-based page number that was requested
    /// - `result`: decoded page or the reason it failed
    PageLoaded {
        generation: u64,
        page: u64,
        result: Result<BookPage, CatalogError>,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: name of the task that panicked
    /// - `generation`: feed generation of the request it was serving
    /// - `error`: the panic message extracted from the panic payload
    TaskPanicked {
        task: &'static str,
        generation: u64,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub catalog: CatalogClient,

    // Navigation
    pub view: View,
    /// Cursor on the genre list.
    pub selected_genre: usize,
    /// Genre handed to the listing view. Empty string = all genres.
    pub selected_category: String,

    // Listing view
    /// The mounted feed. `Some` exactly while `view == View::Books`.
    pub feed: Option<Feed>,
    pub selected_book: usize,
    /// First book index shown in the list widget, carried across frames.
    pub book_list_offset: usize,
    /// Book indices drawn in the last frame. Updated by the book list renderer.
    pub visible_books: Range<usize>,

    // Search box
    pub search_mode: bool,
    pub search_input: String,

    /// Modal notice; swallows the next key press when set.
    pub notice: Option<Cow<'static, str>>,

    /// Status message with expiry
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Last request generation of the most recently unmounted feed. The
    /// next feed continues from here so tags stay unique across mounts.
    retired_generation: u64,

    /// Handle to the page request in flight, aborted when superseded.
    pub fetch_handle: Option<tokio::task::JoinHandle<()>>,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,
}

impl App {
    pub fn new(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            view: View::Genres,
            selected_genre: 0,
            selected_category: String::new(),
            feed: None,
            selected_book: 0,
            book_list_offset: 0,
            visible_books: 0..0,
            search_mode: false,
            search_input: String::new(),
            notice: None,
            status_message: None,
            needs_redraw: true,
            retired_generation: 0,
            fetch_handle: None,
            spinner_frame: 0,
        }
    }

    pub fn books(&self) -> &[Book] {
        self.feed.as_ref().map(Feed::books).unwrap_or_default()
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.books().get(self.selected_book)
    }

    pub fn is_loading(&self) -> bool {
        self.feed.as_ref().is_some_and(Feed::is_loading)
    }

    // ------------------------------------------------------------------------
    // Genre selector
    // ------------------------------------------------------------------------

    /// Store the highlighted genre as the selected category and open the
    /// listing view for it.
    pub fn choose_genre(&mut self) -> Option<FetchRequest> {
        let genre = GENRES.get(self.selected_genre)?;
        self.selected_category = (*genre).to_string();
        Some(self.open_books())
    }

    /// Open the listing view with no genre filter.
    pub fn choose_all_genres(&mut self) -> FetchRequest {
        self.selected_category.clear();
        self.open_books()
    }

    /// Mount a fresh feed for `selected_category` and request its first page.
    pub fn open_books(&mut self) -> FetchRequest {
        self.abort_fetch();
        let seed = self.retire_feed();
        let mut feed = Feed::with_generation(self.selected_category.clone(), seed);
        let request = feed.start();
        tracing::info!(category = %feed.heading(), "Opening book list");

        self.feed = Some(feed);
        self.view = View::Books;
        self.selected_book = 0;
        self.book_list_offset = 0;
        self.visible_books = 0..0;
        self.search_mode = false;
        self.search_input.clear();
        request
    }

    /// Unmount the feed and go back to the genre list.
    pub fn close_books(&mut self) {
        self.abort_fetch();
        self.retire_feed();
        self.view = View::Genres;
        self.search_mode = false;
        self.search_input.clear();
        self.selected_book = 0;
        self.book_list_offset = 0;
        self.visible_books = 0..0;
    }

    /// Drop the mounted feed, remembering its generation.
    ///
    /// `abort()` cannot stop a fetch task that is already being polled, so
    /// that task may still deliver its `PageLoaded` after the feed is gone.
    fn retire_feed(&mut self) -> u64 {
        if let Some(feed) = self.feed.take() {
            self.retired_generation = self.retired_generation.max(feed.generation());
        }
        self.retired_generation
    }

    /// Push the search box contents into the feed.
    ///
    /// Returns the request for page 1 of the new search, or `None` when the
    /// term is unchanged.
    pub fn apply_search_input(&mut self) -> Option<FetchRequest> {
        let request = self.feed.as_mut()?.set_search(self.search_input.clone())?;
        self.selected_book = 0;
        self.book_list_offset = 0;
        self.visible_books = 0..0;
        Some(request)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn nav_up(&mut self) {
        match self.view {
            View::Genres => self.selected_genre = self.selected_genre.saturating_sub(1),
            View::Books => self.selected_book = self.selected_book.saturating_sub(1),
        }
    }

    pub fn nav_down(&mut self) {
        match self.view {
            View::Genres => {
                if self.selected_genre + 1 < GENRES.len() {
                    self.selected_genre += 1;
                }
            }
            View::Books => {
                if self.selected_book + 1 < self.books().len() {
                    self.selected_book += 1;
                }
            }
        }
    }

    pub fn page_up(&mut self) {
        if self.view == View::Books {
            self.selected_book = self.selected_book.saturating_sub(PAGE_JUMP);
        }
    }

    pub fn page_down(&mut self) {
        if self.view == View::Books {
            let last = self.books().len().saturating_sub(1);
            self.selected_book = (self.selected_book + PAGE_JUMP).min(last);
        }
    }

    pub fn nav_first(&mut self) {
        match self.view {
            View::Genres => self.selected_genre = 0,
            View::Books => self.selected_book = 0,
        }
    }

    pub fn nav_last(&mut self) {
        match self.view {
            View::Genres => self.selected_genre = GENRES.len() - 1,
            View::Books => self.selected_book = self.books().len().saturating_sub(1),
        }
    }

    // ------------------------------------------------------------------------
    // Status and tasks
    // ------------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Abort the page request in flight, if any.
    pub fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted in-flight page request");
        }
    }
}

/// Abort the in-flight page request on drop so it cannot outlive the UI loop.
impl Drop for App {
    fn drop(&mut self) {
        self.abort_fetch();
    }
}
