//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current view and mode.

use crate::app::{App, AppEvent, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_selected_book, spawn_page_fetch};
use super::Action;

/// Maximum allowed search query length (UI layer validation)
const MAX_SEARCH_LENGTH: usize = 256;

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode and view.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    // Notice overlay swallows one key, like a blocking alert.
    if app.notice.take().is_some() {
        return Ok(Action::Continue);
    }

    if app.search_mode {
        return Ok(handle_search_input(app, code, event_tx));
    }

    match app.view {
        View::Genres => Ok(handle_genres_input(app, code, event_tx)),
        View::Books => Ok(handle_books_input(app, code)),
    }
}

/// Handle input on the genre selector.
fn handle_genres_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') | KeyCode::Home => app.nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.nav_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if let Some(request) = app.choose_genre() {
                spawn_page_fetch(app, request, event_tx);
            }
        }
        KeyCode::Char('a') => {
            let request = app.choose_all_genres();
            spawn_page_fetch(app, request, event_tx);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input on the book list.
///
/// Page requests are not issued here: moving the selection scrolls the
/// list, and the tail check after the next draw decides whether the next
/// page is needed.
fn handle_books_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('h') | KeyCode::Left => {
            app.close_books();
        }
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.nav_last(),
        KeyCode::Char('/') => {
            app.search_mode = true;
        }
        KeyCode::Enter | KeyCode::Char('o') => open_selected_book(app),
        _ => {}
    }
    Action::Continue
}

/// Handle input while the search box has focus.
///
/// Every edit is pushed to the feed immediately; each change clears the
/// list and restarts from page 1.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Enter => {
            app.search_mode = false;
            return Action::Continue;
        }
        KeyCode::Backspace => {
            if app.search_input.pop().is_none() {
                return Action::Continue;
            }
        }
        KeyCode::Char(c) => {
            if app.search_input.chars().count() >= MAX_SEARCH_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_LENGTH
                ));
                return Action::Continue;
            }
            app.search_input.push(c);
        }
        _ => return Action::Continue,
    }

    if let Some(request) = app.apply_search_input() {
        spawn_page_fetch(app, request, event_tx);
    }
    Action::Continue
}
