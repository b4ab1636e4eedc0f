use crate::app::AppState;
use crate::domain::PanelId;
use crate::ui::styles::{dock_active_style, dock_idle_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HOME_LABEL: &str = " h ⌂ Home ";

/// Dock label for a panel, with the countdown when the pomodoro runs
fn dock_label(app: &AppState, panel: PanelId) -> String {
    match panel {
        PanelId::Pomodoro if app.pomodoro.running => {
            format!(" {} {} {} ", panel.dock_key(), panel.symbol(), app.pomodoro.display())
        }
        _ => format!(" {} {} {} ", panel.dock_key(), panel.symbol(), panel.name()),
    }
}

/// Render the dock and record where each button landed
pub fn render_dock(f: &mut Frame, app: &mut AppState, area: Rect) {
    let mut spans = Vec::new();
    let mut hits = Vec::new();
    let mut x = area.x;

    let home = Span::styled(HOME_LABEL, dock_idle_style());
    let home_width = home.width() as u16;
    app.hit_areas.home = Some(Rect::new(x, area.y, home_width.min(area.width), 1));
    spans.push(home);
    x = x.saturating_add(home_width + 1);
    spans.push(Span::raw(" "));

    for panel in PanelId::all() {
        let style = if app.panels.is_shown(*panel) {
            dock_active_style()
        } else {
            dock_idle_style()
        };
        let button = Span::styled(dock_label(app, *panel), style);
        let width = button.width() as u16;

        if x < area.x + area.width {
            let visible = width.min(area.x + area.width - x);
            hits.push((*panel, Rect::new(x, area.y, visible, 1)));
        }
        spans.push(button);
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }

    spans.push(Span::styled(" Tab focus  Esc close  q quit", hint_style()));
    app.hit_areas.dock = hits;

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Settings;
    use crate::player::{NullAudio, NullSurface, Player};
    use crate::ticker::ManualTicks;
    use crate::todo::LocalTodoStore;

    fn create_test_app() -> AppState {
        let player = Player::new(Box::new(NullAudio), Box::new(NullSurface), 0.5);
        AppState::new(
            Settings::default(),
            player,
            Box::new(LocalTodoStore::new()),
            Box::new(ManualTicks::new()),
        )
    }

    #[test]
    fn test_pomodoro_label_shows_countdown_while_running() {
        let mut app = create_test_app();
        assert_eq!(dock_label(&app, PanelId::Pomodoro), " 5 ⏱ Pomodoro ");

        app.pomodoro.start();
        assert_eq!(dock_label(&app, PanelId::Pomodoro), " 5 ⏱ 25:00 ");
    }
}
