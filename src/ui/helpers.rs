//! Helper functions for UI operations.
//!
//! Background page fetches and opening a book's viewable link.

use crate::app::{App, AppEvent};
use crate::catalog::display::{viewable_link, NO_VIEWABLE_VERSION};
use crate::feed::FetchRequest;
use crate::util::validate_link;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking fetch task would otherwise vanish silently and leave the feed
/// stuck in its loading state; instead the panic message comes back as
/// `Err(String)` and is reported through `AppEvent::TaskPanicked`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn the page request returned by the feed.
///
/// Aborts whatever request was still in flight: the feed has already bumped
/// its generation, so that response would be discarded anyway.
pub(super) fn spawn_page_fetch(
    app: &mut App,
    request: FetchRequest,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    app.abort_fetch();

    let catalog = app.catalog.clone();
    let tx = event_tx.clone();
    let FetchRequest { generation, query } = request;

    tracing::debug!(
        generation,
        page = query.page,
        topic = %query.topic,
        search = %query.search,
        "Spawning page request"
    );

    app.fetch_handle = Some(tokio::spawn(async move {
        let page = query.page;
        let event = match catch_task_panic(catalog.fetch_page(&query)).await {
            Ok(result) => AppEvent::PageLoaded {
                generation,
                page,
                result,
            },
            Err(panic_msg) => AppEvent::TaskPanicked {
                task: "page_fetch",
                generation,
                error: panic_msg,
            },
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send page result (receiver dropped)");
        }
    }));
}

/// Open the selected book's viewable link in the system browser.
///
/// Shows the "no viewable version" notice instead when the book has no
/// HTML, PDF or plain-text format.
pub(super) fn open_selected_book(app: &mut App) {
    let Some(book) = app.selected_book() else {
        return;
    };

    let target = viewable_link(&book.formats).map(|link| (link.url.to_string(), link.kind));
    let book_id = book.id;

    let Some((url, kind)) = target else {
        tracing::info!(book_id, "No viewable format for book");
        app.notice = Some(NO_VIEWABLE_VERSION.into());
        return;
    };

    match validate_link(&url) {
        Ok(url) => {
            tracing::info!(book_id, format = kind.label(), url = %url, "Opening book");
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(book_id, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status(format!("Opened {} version", kind.label()));
            }
        }
        Err(e) => {
            tracing::warn!(book_id, error = %e, "Refusing to open catalog link");
            app.set_status(format!("Cannot open link: {}", e));
        }
    }
}
