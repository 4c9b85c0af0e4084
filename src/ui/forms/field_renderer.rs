//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the error line under it
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field, with its error message below when `show_error` is set
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    show_error: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error message
        ])
        .split(area);

    let border_style = if show_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active { "▌" } else { "" };

    let value = if field.is_empty() {
        Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(field.display_value(), Style::default().fg(Color::White))
    };

    // Cursor sits before the placeholder so typing appears where it points
    let line = if field.is_empty() {
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            value,
        ])
    } else {
        Line::from(vec![
            value,
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), chunks[0]);

    if show_error {
        let error = Paragraph::new(Span::styled(
            format!(" {}", field.error_text),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error, chunks[1]);
    }
}
