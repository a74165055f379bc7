use crate::app::{App, CATALOG_BLURB, CATALOG_TITLE, GENRES};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the genre selector: catalog header above the genre list.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            CATALOG_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(CATALOG_BLURB, Style::default().fg(Color::Gray))),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = GENRES
        .iter()
        .enumerate()
        .map(|(i, genre)| {
            let style = if i == app.selected_genre {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", genre.to_uppercase()), style),
                Span::styled(" >", Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Genres"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(app.selected_genre));
    f.render_stateful_widget(list, chunks[1], &mut state);
}
