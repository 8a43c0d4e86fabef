//! Search bar and suggestion panel rendering
//!
//! Renders the query input with a block cursor and, when open, the dropdown
//! panel listing either live geocoding suggestions or recent searches.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, PanelContent};

/// Placeholder shown while the query is empty
const PLACEHOLDER: &str = "Search for a city...";

/// Renders the search input box
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.search.query();

    let content = if query.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(query.to_string()),
            Span::styled("\u{2588}", Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(" Search city ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Renders the dropdown under the search bar when it has content to show.
///
/// `area` is the region below the search bar the panel may grow into; the
/// panel only claims as many rows as it has entries.
pub fn render_suggestion_panel(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.panel_content() {
        PanelContent::Hidden => return,
        PanelContent::Suggestions => suggestion_lines(app),
        PanelContent::Recent => recent_lines(app),
    };

    let height = (lines.len() as u16 + 2).min(area.height);
    let panel_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Clear, panel_area);
    frame.render_widget(Paragraph::new(lines).block(block), panel_area);
}

/// Lines for live geocoding suggestions
fn suggestion_lines(app: &App) -> Vec<Line<'static>> {
    app.search
        .suggestions()
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            entry_line(
                "\u{1F4CD}", // 📍
                suggestion.label(),
                app.search.selected() == Some(index),
            )
        })
        .collect()
}

/// Lines for the recent-search fallback list
fn recent_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Recent searches",
        Style::default().fg(Color::DarkGray),
    ))];

    lines.extend(app.recent.entries().iter().enumerate().map(|(index, city)| {
        entry_line(
            "\u{1F550}", // 🕐
            city.clone(),
            app.search.selected() == Some(index),
        )
    }));

    lines
}

fn entry_line(glyph: &str, label: String, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(Span::styled(format!(" {glyph} {label}"), style))
}
