//! Alert channel form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{AlertsForm, ChannelKind, Form};
use crate::ui::components::{render_save_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of the save button
const SAVE_BUTTON_WIDTH: u16 = 16;

/// Draw the alert channel form for the current view
pub fn draw_alerts_form(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(form) = &app.state.form {
        draw_form(frame, area, form, app.state.is_saving());
    }
}

fn draw_form(frame: &mut Frame, area: Rect, form: &AlertsForm, is_loading: bool) {
    let title = match &form.kind {
        ChannelKind::Other(_) => " Alerts ".to_string(),
        kind => format!(" {} ", kind.label()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_count = form.input_count();
    let mut constraints: Vec<Constraint> = (0..input_count)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Save
    constraints.push(Constraint::Min(0)); // Remaining space

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for index in 0..input_count {
        if let Some(field) = form.get_field(index) {
            draw_field(
                frame,
                chunks[index],
                field,
                form.active_field() == index,
                form.has_error(index),
            );
        }
    }

    let button_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SAVE_BUTTON_WIDTH), Constraint::Min(0)])
        .split(chunks[input_count]);
    render_save_button(
        frame,
        button_row[0],
        form.is_save_button_active(),
        is_loading,
    );
}
