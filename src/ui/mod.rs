//! UI module for rendering the TUI

mod channel_list;
mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;
use widgets::render_scrollable_list;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match &app.state.current_view {
        View::ChannelConfiguration => channel_list::draw(frame, main_area, app),
        View::AlertsForm(_) => forms::draw_alerts_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);
}
