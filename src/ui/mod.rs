pub mod calendar_pane;
pub mod clock;
pub mod dock;
pub mod games_pane;
pub mod home;
pub mod layout;
pub mod mini_player;
pub mod music_pane;
pub mod pomodoro_pane;
pub mod scene_pane;
pub mod settings_pane;
pub mod styles;
pub mod todo_pane;
pub mod toast;

use crate::app::AppState;
use crate::domain::{PanelId, Screen};
use calendar_pane::render_calendar_pane;
use clock::render_clock;
use dock::render_dock;
use games_pane::render_games_pane;
use home::render_home;
use layout::create_layout;
use mini_player::render_mini_player;
use music_pane::render_music_pane;
use pomodoro_pane::render_pomodoro_pane;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Clear},
    Frame,
};
use scene_pane::render_scene;
use settings_pane::render_settings_pane;
use styles::{border_style, focused_border_style, title_style};
use todo_pane::render_todo_pane;
use toast::render_toast;

/// Bordered panel frame, highlighted when it has keyboard focus
pub fn panel_block(panel: PanelId, focused: bool, detail: Option<&str>) -> Block<'static> {
    let title = match detail {
        Some(detail) => format!(" {} {} · {} ", panel.symbol(), panel.name(), detail),
        None => format!(" {} {} ", panel.symbol(), panel.name()),
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style()))
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size, &app.panels);

    render_clock(f, app, layout.header_area);

    app.hit_areas.progress_bar = None;
    match app.screen {
        Screen::Home => render_home(f, layout.scene_area),
        Screen::Room => {
            render_scene(f, app, layout.scene_area);
            for panel in PanelId::all() {
                if let Some(area) = layout.panel_area(*panel) {
                    render_panel(f, app, *panel, area);
                }
            }
        }
    }

    // Music keeps playing on the home screen, so the mini-player stays
    if let Some(area) = layout.mini_player_area {
        let focused = app.focus == Some(PanelId::Music);
        render_mini_player(f, app, area, focused);
    }

    render_dock(f, app, layout.dock_area);
    render_toast(f, app, layout.scene_area);
}

fn render_panel(f: &mut Frame, app: &mut AppState, panel: PanelId, area: Rect) {
    let focused = app.focus == Some(panel);

    // Clear the scene behind the panel
    f.render_widget(Clear, area);

    match panel {
        PanelId::Music => render_music_pane(f, app, area, focused),
        PanelId::MiniGames => render_games_pane(f, app, area, focused),
        PanelId::Settings => render_settings_pane(f, app, area, focused),
        PanelId::Calendar => render_calendar_pane(f, app, area, focused),
        PanelId::Pomodoro => render_pomodoro_pane(f, app, area, focused),
        PanelId::Todo => render_todo_pane(f, app, area, focused),
    }
}
