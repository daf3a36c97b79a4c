//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod board;
mod log;
mod status;

use pairlink_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (board + game log).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const BOARD_WIDTH: u16 = 30;
    const LOG_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH), Constraint::Min(LOG_MIN_WIDTH)])
        .split(area);

    let [board_area, log_area] = chunks.as_ref() else {
        return;
    };

    board::render(frame, app, *board_area);
    log::render(frame, app, *log_area);
}
