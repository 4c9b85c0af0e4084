//! Channel configuration listing

use super::render_scrollable_list;
use crate::app::App;
use crate::state::ChannelKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One-line description shown next to each channel
fn channel_description(kind: &ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Email => "Send alerts through an SMTP server",
        ChannelKind::Slack => "Post alerts to a Slack incoming webhook",
        ChannelKind::Other(_) => "",
    }
}

/// Draw the list of configurable channels
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Channels
            Constraint::Length(2), // Last save
        ])
        .split(area);

    let items: Vec<ListItem> = ChannelKind::CONFIGURABLE
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{:<8}", kind.label()),
                    style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(channel_description(kind), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Alert Channels ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, chunks[0], list, app.state.selected_index);

    if let Some(saved_at) = app.state.last_saved_at {
        let footer = Paragraph::new(Span::styled(
            format!(" Last saved {}", saved_at.format("%Y-%m-%d %H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(footer, chunks[1]);
    }
}
