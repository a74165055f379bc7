use crate::app::{App, View};
use crate::feed::FeedState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(status_text(app)).style(style), area);
}

/// Status message if one is showing, otherwise key hints for the view.
/// On the book list the hints follow the feed state.
fn status_text(app: &App) -> Cow<'_, str> {
    if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.search_mode {
        Cow::Borrowed("Type to search | ESC/ENTER done")
    } else {
        match app.view {
            View::Genres => Cow::Borrowed("[j/k]move [Enter]open [a]ll genres [q]uit"),
            View::Books => match app.feed.as_ref().map(|feed| (feed, feed.state())) {
                Some((feed, FeedState::Fetching)) if !feed.books().is_empty() => Cow::Owned(
                    format!("Loading page {}... | [/]search [o]pen [b]ack [q]uit", feed.page()),
                ),
                Some((feed, FeedState::Loaded { has_more: false })) if !feed.books().is_empty() => {
                    Cow::Owned(format!(
                        "{} books, end of list | [/]search [o]pen [b]ack [q]uit",
                        feed.books().len()
                    ))
                }
                _ => Cow::Borrowed("[j/k]move [/]search [o]pen [b]ack [q]uit"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Book, BookPage, CatalogClient, DEFAULT_BASE_URL};
    use std::time::Duration;

    fn books(n: u64) -> Vec<Book> {
        (0..n)
            .map(|id| Book {
                id,
                title: String::new(),
                authors: Vec::new(),
                formats: Default::default(),
            })
            .collect()
    }

    fn app_with_page(count: u64, n: u64) -> App {
        let catalog =
            CatalogClient::new(DEFAULT_BASE_URL, Duration::from_secs(5), 1024).unwrap();
        let mut app = App::new(catalog);
        let request = app.choose_all_genres();
        app.feed.as_mut().unwrap().apply_page(
            request.generation,
            1,
            Ok(BookPage {
                count,
                results: books(n),
            }),
        );
        app
    }

    #[test]
    fn test_end_of_list_shown_when_no_more_pages() {
        let app = app_with_page(3, 3);
        assert_eq!(
            status_text(&app),
            "3 books, end of list | [/]search [o]pen [b]ack [q]uit"
        );
    }

    #[test]
    fn test_plain_hints_while_more_pages_exist() {
        let app = app_with_page(40, 32);
        assert_eq!(status_text(&app), "[j/k]move [/]search [o]pen [b]ack [q]uit");
    }

    #[test]
    fn test_loading_next_page_names_the_page() {
        let mut app = app_with_page(40, 32);
        let feed = app.feed.as_mut().unwrap();
        assert!(feed.report_visible(30..32).is_some());
        assert_eq!(
            status_text(&app),
            "Loading page 2... | [/]search [o]pen [b]ack [q]uit"
        );
    }

    #[test]
    fn test_status_message_wins() {
        let mut app = app_with_page(3, 3);
        app.set_status("Opened HTML version");
        assert_eq!(status_text(&app), "Opened HTML version");
    }
}
