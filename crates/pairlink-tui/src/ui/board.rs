//! Board area
//!
//! Displays the card grid with the cursor, revealed, and matched states.

use pairlink_app::{App, CardView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Cards per row.
const COLUMNS: usize = 4;

/// Render the board area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Board ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = app.cards();
    if cards.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "press s, d, or p to start",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, inner);
        return;
    }

    let rows = cards.len().div_ceil(COLUMNS);
    let row_constraints = vec![Constraint::Length(3); rows];
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    for (row_index, row_area) in row_areas.iter().enumerate() {
        let col_constraints = vec![Constraint::Length(6); COLUMNS];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_index, cell) in cells.iter().enumerate() {
            let index = row_index * COLUMNS + col_index;
            let Some(card) = cards.get(index) else {
                continue;
            };
            render_card(frame, *card, index == app.cursor(), *cell);
        }
    }
}

/// Render a single card cell.
fn render_card(frame: &mut Frame, card: CardView, under_cursor: bool, area: Rect) {
    let (text, style) = match card {
        CardView::Hidden => ("?".to_string(), Style::default().fg(Color::DarkGray)),
        CardView::Revealed(symbol) => (symbol.to_string(), Style::default().fg(Color::Yellow)),
        CardView::Matched(symbol) => (
            symbol.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let border_style = if under_cursor {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cell = Paragraph::new(Line::from(Span::styled(text, style)))
        .centered()
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    frame.render_widget(cell, area);
}
