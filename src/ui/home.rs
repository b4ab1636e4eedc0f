use crate::ui::clock::clock_text;
use crate::ui::layout::centered_rect;
use crate::ui::styles::{hint_style, title_style};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Landing screen reached through the home button
pub fn render_home(f: &mut Frame, area: Rect) {
    let clock = clock_text(&Local::now());
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("nook", title_style())),
        Line::raw(""),
        Line::from(Span::styled(clock.time, title_style())),
        Line::raw(clock.weekday),
        Line::raw(clock.date),
        Line::raw(""),
        Line::styled("Enter to step back into the room", hint_style()),
        Line::styled("1-6 open a panel   q quit", hint_style()),
    ];

    let rect = centered_rect(area, 40, lines.len() as u16 + 2);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, rect);
}
