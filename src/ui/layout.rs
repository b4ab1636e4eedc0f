use crate::domain::{PanelId, PanelVisibility};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Room layout structure
pub struct RoomLayout {
    pub header_area: Rect,
    pub scene_area: Rect,
    /// Indexed by `PanelId::index`; None when the panel is hidden
    pub panel_areas: [Option<Rect>; 6],
    pub mini_player_area: Option<Rect>,
    pub dock_area: Rect,
}

impl RoomLayout {
    pub fn panel_area(&self, panel: PanelId) -> Option<Rect> {
        self.panel_areas[panel.index()]
    }
}

/// Panels stacked in each column, top to bottom
const COLUMNS: [[PanelId; 2]; 3] = [
    [PanelId::Music, PanelId::Todo],
    [PanelId::MiniGames, PanelId::Pomodoro],
    [PanelId::Settings, PanelId::Calendar],
];

const MINI_PLAYER_HEIGHT: u16 = 3;

/// Create the room layout
/// - Top bar: date/time header (1 row)
/// - Main area: the scene, with shown panels floating in three columns
///   - Left: Music over Todo, Center: Games over Pomodoro, Right: Settings over Calendar
/// - Mini-player strip (when music is minimized) above the dock (1 row)
pub fn create_layout(area: Rect, panels: &PanelVisibility) -> RoomLayout {
    let mini = panels.shows_mini_player();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(if mini { MINI_PLAYER_HEIGHT } else { 0 }),
            Constraint::Length(1),
        ])
        .split(area);

    let header_area = main_chunks[0];
    let scene_area = main_chunks[1];
    let dock_area = main_chunks[3];
    let mini_player_area = mini.then_some(main_chunks[2]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(32),
            Constraint::Percentage(34),
        ])
        .split(scene_area);

    let mut panel_areas = [None; 6];
    for (column, stack) in columns.iter().zip(COLUMNS) {
        let visible: Vec<PanelId> = stack
            .into_iter()
            .filter(|p| is_mounted(panels, *p))
            .collect();
        if visible.is_empty() {
            continue;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, visible.len() as u32); visible.len()])
            .split(*column);
        for (panel, row) in visible.into_iter().zip(rows.iter()) {
            panel_areas[panel.index()] = Some(*row);
        }
    }

    RoomLayout {
        header_area,
        scene_area,
        panel_areas,
        mini_player_area,
        dock_area,
    }
}

/// The full music player gives its slot to the mini-player when minimized
fn is_mounted(panels: &PanelVisibility, panel: PanelId) -> bool {
    match panel {
        PanelId::Music => panels.shows_full_player(),
        other => panels.is_shown(other),
    }
}

/// Centered box of the given size, clamped to `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
