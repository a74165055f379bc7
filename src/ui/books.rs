use crate::app::App;
use crate::catalog::display::{display_author_name, viewable_link};
use crate::catalog::Book;
use crate::util::{sanitize_line, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::ops::Range;

/// Braille spinner, one frame per tick.
pub(super) const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Render the book listing screen: header, search box and the book list.
///
/// Records which books ended up on screen in `app.visible_books`; the event
/// loop feeds that range to the tail observer after the frame is drawn.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_search_box(f, app, chunks[1]);
    render_list(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let heading = app.feed.as_ref().map(|feed| feed.heading()).unwrap_or_default();
    let line = Line::from(vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            heading.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.search_input.is_empty() && !app.search_mode {
        ("Search".to_string(), Style::default().fg(Color::DarkGray))
    } else if app.search_mode {
        (format!("{}_", app.search_input), Style::default())
    } else {
        (app.search_input.clone(), Style::default())
    };

    let border_style = if app.search_mode {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("/"),
    );
    f.render_widget(paragraph, area);
}

fn render_list(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(feed) = app.feed.as_ref() else {
        return;
    };

    let width = area.width.saturating_sub(2) as usize;
    let tail = feed.books().len().checked_sub(1);
    let items: Vec<ListItem> = if feed.books().is_empty() {
        let msg = if feed.is_loading() {
            "Loading..."
        } else {
            "No books found"
        };
        vec![ListItem::new(Span::styled(
            msg,
            Style::default().fg(Color::Gray),
        ))]
    } else {
        feed.books()
            .iter()
            .enumerate()
            .map(|(i, book)| {
                book_item(
                    book,
                    i == app.selected_book,
                    Some(i) == tail && feed.has_more(),
                    width,
                )
            })
            .collect()
    };
    let heights: Vec<usize> = items.iter().map(ListItem::height).collect();

    let mut title = format!("Books ({})", feed.books().len());
    if feed.is_loading() {
        title.push(' ');
        title.push(SPINNER[app.spinner_frame % SPINNER.len()]);
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default());

    let has_books = !feed.books().is_empty();
    let mut state = ListState::default()
        .with_offset(app.book_list_offset)
        .with_selected(has_books.then_some(app.selected_book));
    f.render_stateful_widget(list, area, &mut state);

    app.book_list_offset = state.offset();
    app.visible_books = if has_books {
        visible_range(&heights, state.offset(), area.height.saturating_sub(2) as usize)
    } else {
        0..0
    };
}

/// One entry in the book list.
///
/// `more_below` is set on the tail element while further pages exist; it
/// adds a hint line telling the user that scrolling loads more.
fn book_item(book: &Book, selected: bool, more_below: bool, width: usize) -> ListItem<'static> {
    let marker = if selected { "> " } else { "  " };
    let title_style = if selected {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let body_width = width.saturating_sub(marker.len());

    let title = sanitize_line(&book.title);
    let mut lines = vec![Line::from(vec![
        Span::raw(marker),
        Span::styled(truncate_to_width(&title, body_width).into_owned(), title_style),
    ])];

    for author in &book.authors {
        let name = display_author_name(&author.name);
        let name = sanitize_line(&name);
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_to_width(&name, body_width).into_owned(),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    let format = match viewable_link(&book.formats) {
        Some(link) => Span::styled(
            format!("[{}]", link.kind.label()),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("[no viewable version]", Style::default().fg(Color::DarkGray)),
    };
    lines.push(Line::from(vec![Span::raw("  "), format]));

    if more_below {
        lines.push(Line::from(Span::styled(
            "  ... more below",
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

/// Indices of the items drawn when the list starts at `offset`.
///
/// Only items that fit entirely are counted, matching what the list widget
/// draws, except that the first item is always counted as on screen.
pub(super) fn visible_range(heights: &[usize], offset: usize, viewport: usize) -> Range<usize> {
    if offset >= heights.len() {
        return offset..offset;
    }
    let mut used = 0;
    let mut end = offset;
    for height in &heights[offset..] {
        if end > offset && used + height > viewport {
            break;
        }
        used += height;
        end += 1;
    }
    offset..end
}
