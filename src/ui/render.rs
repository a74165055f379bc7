//! Render functions for the TUI.
//!
//! Dispatches to the genre selector or the book list, then draws the
//! status bar and any pending notice on top.

use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{books, genres, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        // Nothing drawn means nothing visible: the tail observer must not fire.
        app.visible_books = 0..0;
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.view {
        View::Genres => genres::render(f, app, chunks[0]),
        View::Books => books::render(f, app, chunks[0]),
    }
    status::render(f, app, chunks[1]);

    if let Some(notice) = app.notice.as_deref() {
        render_notice(f, notice);
    }
}

/// Render a blocking notice centered on screen.
fn render_notice(f: &mut Frame, text: &str) {
    let area = f.area();

    let width = 44u16.min(area.width.saturating_sub(4));
    let height = 6u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 4 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(format!("{}\n\n(any key) Dismiss", text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Notice "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, overlay);
}
