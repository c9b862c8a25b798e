//! TUI module for pinch_deck
//!
//! Zone map on the left, control and deck readouts on the right.

mod panel;
mod zones;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::app::App;

use panel::render_panel;
use zones::render_zones;

/// Render one frame of the simulator.
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Map + panel
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    render_zones(frame, columns[0], app);
    render_panel(frame, columns[1], app);

    let help = Paragraph::new(
        " L: WASD move  E pinch  Z/X orbit  1 hide | R: arrows  Enter pinch  ,/. orbit  2 hide | [R] reset  [P] knob defaults  [Q] quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[1]);
}
