use crate::app::AppState;
use crate::ui::music_pane::transport_label;
use crate::ui::styles::{border_style, focused_border_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Compact player strip shown while the music panel is minimized
pub fn render_mini_player(f: &mut Frame, app: &mut AppState, area: Rect, focused: bool) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(inner);

    let track = app.player.current_track();
    let label = Line::from(vec![
        Span::styled(format!(" ♪ {}", track.title), title_style()),
        Span::styled(format!("  {}", track.artist), hint_style()),
    ]);
    f.render_widget(Paragraph::new(label), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(app.player.progress_ratio())
        .label(app.player.position_label());
    f.render_widget(gauge, chunks[1]);
    app.hit_areas.progress_bar = (!app.player.using_external_video()).then_some(chunks[1]);

    f.render_widget(
        Paragraph::new(format!(" {}  z expand", transport_label(app))),
        chunks[2],
    );
}
