use crate::app::AppState;
use crate::domain::{PanelId, TimerPhase};
use crate::ui::panel_block;
use crate::ui::styles::{gauge_style, hint_style, phase_style, selected_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Render the pomodoro timer
pub fn render_pomodoro_pane(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let block = panel_block(PanelId::Pomodoro, focused, None);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Phase tabs
            Constraint::Min(3),    // Countdown
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Cycles
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let timer = &app.pomodoro;
    let tab = |phase: TimerPhase| {
        let label = format!(" {} {} ", phase.symbol(), phase.name());
        if timer.phase == phase {
            Span::styled(label, selected_style())
        } else {
            Span::raw(label)
        }
    };
    let tabs = Line::from(vec![tab(TimerPhase::Focus), Span::raw(" "), tab(TimerPhase::Break)]);
    f.render_widget(Paragraph::new(tabs).alignment(Alignment::Center), chunks[0]);

    let status = if timer.running { "running" } else { "paused" };
    let countdown = vec![
        Line::raw(""),
        Line::from(Span::styled(timer.display(), phase_style(timer.phase))),
        Line::from(Span::styled(status, hint_style())),
    ];
    f.render_widget(Paragraph::new(countdown).alignment(Alignment::Center), chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(timer.progress_ratio().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[2]);

    f.render_widget(
        Paragraph::new(format!("Completed cycles: {}", timer.completed_cycles))
            .alignment(Alignment::Center),
        chunks[3],
    );
    f.render_widget(
        Paragraph::new("Spc start/pause  r reset  f focus  b break").style(hint_style()),
        chunks[4],
    );
}
