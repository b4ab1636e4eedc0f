use crate::app::AppState;
use crate::domain::PanelId;
use crate::player::visualizer::BAR_MAX;
use crate::ui::panel_block;
use crate::ui::styles::{default_style, gauge_style, hint_style, selected_style, title_style, visualizer_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Sparkline},
    Frame,
};

/// "▶ Playing" or "⏸ Paused" plus volume
pub fn transport_label(app: &AppState) -> String {
    let state = if app.player.is_playing {
        "▶ Playing"
    } else {
        "⏸ Paused"
    };
    format!("{}   vol {:>3}%", state, (app.player.volume * 100.0).round() as u32)
}

/// Render the full music player
pub fn render_music_pane(f: &mut Frame, app: &mut AppState, area: Rect, focused: bool) {
    let block = panel_block(PanelId::Music, focused, Some(app.player.category().name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title and artist
            Constraint::Length(4), // Visualizer
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Transport
            Constraint::Min(0),    // Track list
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let track = app.player.current_track();
    let heading = vec![
        Line::from(Span::styled(track.title, title_style())),
        Line::from(Span::styled(track.artist, hint_style())),
    ];
    f.render_widget(Paragraph::new(heading), chunks[0]);

    if app.player.using_external_video() {
        let note = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  streaming from video", hint_style()),
        ]);
        f.render_widget(note, chunks[1]);
    } else {
        let sparkline = Sparkline::default()
            .data(app.visualizer.bars())
            .max(BAR_MAX)
            .style(visualizer_style());
        f.render_widget(sparkline, chunks[1]);
    }

    render_progress(f, app, chunks[2]);

    f.render_widget(
        Paragraph::new(transport_label(app)).style(default_style()),
        chunks[3],
    );

    let items: Vec<ListItem> = app
        .player
        .tracks()
        .iter()
        .map(|t| ListItem::new(format!(" {} - {}", t.title, t.artist)))
        .collect();
    let mut state = ListState::default().with_selected(Some(app.player.current_index()));
    f.render_stateful_widget(
        List::new(items).highlight_style(selected_style()),
        chunks[4],
        &mut state,
    );

    f.render_widget(
        Paragraph::new("Spc play  n/b track  a list  +/- vol  ←/→ seek  z mini").style(hint_style()),
        chunks[5],
    );
}

/// Elapsed | bar | duration. The bar is clickable for raw audio.
fn render_progress(f: &mut Frame, app: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(6),
        ])
        .split(area);

    f.render_widget(Paragraph::new(app.player.position_label()), chunks[0]);
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(app.player.progress_ratio())
        .label("");
    f.render_widget(gauge, chunks[1]);
    f.render_widget(Paragraph::new(format!(" {}", app.player.duration_label())), chunks[2]);

    app.hit_areas.progress_bar = if app.player.using_external_video() {
        None
    } else {
        Some(chunks[1])
    };
}
