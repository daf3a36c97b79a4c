//! Status bar
//!
//! Displays mode, turn, and link information plus transient messages.

use pairlink_app::{App, LinkState};
use pairlink_core::GameMode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode() {
        None => Span::styled("no game", Style::default().fg(Color::DarkGray)),
        Some(GameMode::Single) => Span::styled("single", Style::default().fg(Color::Green)),
        Some(GameMode::Daily) => Span::styled("daily", Style::default().fg(Color::Green)),
        Some(GameMode::Peer) => {
            let text = if app.our_turn() { "peer (your turn)" } else { "peer (waiting)" };
            Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        },
    };

    let link = match app.link() {
        LinkState::Offline => Span::styled(" | link: offline", Style::default().fg(Color::Red)),
        LinkState::Linked => Span::styled(" | link: up", Style::default().fg(Color::Green)),
    };

    let extra = app.status_message().map_or_else(
        || " | s/d/p start  e export  i import  q quit".to_string(),
        |message| format!(" | {message}"),
    );

    let status_line = Line::from(vec![
        Span::raw(" "),
        mode,
        link,
        Span::styled(extra, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
