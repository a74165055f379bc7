//! Application event handling.
//!
//! Processes background task completion events: page responses and
//! panicked fetch tasks.

use crate::app::{App, AppEvent};
use crate::feed::PageOutcome;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::PageLoaded {
            generation,
            page,
            result,
        } => {
            let Some(feed) = app.feed.as_mut() else {
                tracing::debug!(generation, page, "Page arrived after book list closed");
                return;
            };
            match feed.apply_page(generation, page, result) {
                PageOutcome::Appended { .. } | PageOutcome::Failed => {
                    app.fetch_handle = None;
                }
                PageOutcome::Stale => {}
            }
        }
        AppEvent::TaskPanicked {
            task,
            generation,
            error,
        } => {
            tracing::error!(task, generation, error, "Background task panicked");
            if let Some(feed) = app.feed.as_mut() {
                feed.abandon_fetch(generation);
            }
        }
    }
}
