use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::domain::Scene;
use crate::ui::styles::{fire_style, rain_style};

const FRAMES_PER_CYCLE: u32 = 40; // 40 frames at 10 FPS = 4 second loop
const FIREPLACE_WIDTH: u16 = 8;

/// Render the room background: the chosen scene plus rain and fireplace
pub fn render_scene(f: &mut Frame, app: &AppState, area: Rect) {
    let frame_index = (app.animation_frame % FRAMES_PER_CYCLE) as usize;
    let (color, art) = scene_art(app.settings.scene, frame_index);

    let art_height = (art.len() as u16).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(art_height)])
        .split(area);

    let scene = Paragraph::new(art)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(scene, chunks[1]);

    if app.settings.fireplace {
        render_fireplace(f, chunks[1], frame_index);
    }
    if app.settings.raining {
        render_rain(f, area, app.animation_frame);
    }
}

fn scene_art(scene: Scene, frame: usize) -> (Color, Vec<Line<'static>>) {
    match scene {
        Scene::Cottage => cottage_art(frame),
        Scene::Meadow => meadow_art(frame),
        Scene::Sky => sky_art(frame),
    }
}

fn cottage_art(frame: usize) -> (Color, Vec<Line<'static>>) {
    // Chimney smoke drifts
    let smoke_frames = [
        ["      (  ", "     )   "],
        ["     (   ", "      )  "],
        ["      )  ", "     (   "],
        ["     )   ", "      (  "],
    ];
    let smoke = smoke_frames[(frame / 10) % smoke_frames.len()];

    let lines = vec![
        Line::from(format!("{}              ", smoke[0])),
        Line::from(format!("{}              ", smoke[1])),
        Line::from("     _||_____________      "),
        Line::from("    /  ||            \\     "),
        Line::from("   /__________________\\    "),
        Line::from("    |  []    __    [] |    "),
        Line::from("    |       |  |      |  ♣ "),
        Line::from(" ♣  |_______|__|______| ♣♣ "),
        Line::from("~~~~~~~~~~~~~~~~~~~~~~~~~~~"),
    ];

    (Color::Yellow, lines)
}

fn meadow_art(frame: usize) -> (Color, Vec<Line<'static>>) {
    // Grass sways every half second
    let grass = if (frame / 5) % 2 == 0 {
        " \\|/ \\|/  \\|/  \\|/ \\|/  \\|/ "
    } else {
        " /|\\ /|\\  /|\\  /|\\ /|\\  /|\\ "
    };

    let lines = vec![
        Line::from("         ___             "),
        Line::from("       _(   )_    .--.   "),
        Line::from("      (_______)  ( o o)  "),
        Line::from("         | |     /|  |\\  "),
        Line::from("    ✿    | |      |__|   ✿ "),
        Line::from(grass),
        Line::from("~~~~~~~~~~~~~~~~~~~~~~~~~~~~"),
    ];

    (Color::Green, lines)
}

fn sky_art(frame: usize) -> (Color, Vec<Line<'static>>) {
    // Clouds drift one cell per frame across a 30-column strip
    let offset = frame % 30;
    let cloud = |shift: usize| -> String {
        let pad = (offset + shift) % 30;
        format!("{}☁{}", " ".repeat(pad), " ".repeat(30 - pad))
    };

    let lines = vec![
        Line::from(cloud(0)),
        Line::from(""),
        Line::from(cloud(11)),
        Line::from("         .  *   .          "),
        Line::from("    *        ✈        .    "),
        Line::from(cloud(22)),
        Line::from("   ___/\\___/\\_____/\\___    "),
    ];

    (Color::LightCyan, lines)
}

/// Flickering hearth in the bottom-left corner of `area`
fn render_fireplace(f: &mut Frame, area: Rect, frame: usize) {
    let flames = [
        [" (  ) ", "( )( )"],
        ["  )(  ", " (  ) "],
        [" )  ( ", "( () )"],
    ];
    let flame = flames[(frame / 3) % flames.len()];
    let art = vec![
        Line::from(" ______ "),
        Line::from(format!("|{}|", flame[0])),
        Line::from(format!("|{}|", flame[1])),
        Line::from("|_/\\/\\_|"),
    ];

    let Some(rect) = fireplace_rect(area, art.len() as u16) else {
        return;
    };
    f.render_widget(Paragraph::new(art).style(fire_style()), rect);
}

/// Hearth box one column in from the left edge, clipped to `area`
fn fireplace_rect(area: Rect, rows: u16) -> Option<Rect> {
    let width = area.width.saturating_sub(1).min(FIREPLACE_WIDTH);
    let height = rows.min(area.height);
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect::new(area.x + 1, area.y + area.height - height, width, height))
}

/// Whether a rain streak falls through this cell on this frame
pub fn is_raindrop(x: u16, y: u16, frame: u32) -> bool {
    let column_seed = (i64::from(x) * 7) % 13;
    x % 3 == 0 && (i64::from(y) + column_seed * 3 - i64::from(frame)).rem_euclid(9) == 0
}

/// Falling streaks over empty cells only
fn render_rain(f: &mut Frame, area: Rect, frame: u32) {
    let buffer = f.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if !is_raindrop(x, y, frame) {
                continue;
            }
            let cell = buffer.get_mut(x, y);
            if cell.symbol() == " " {
                cell.set_char('╎').set_style(rain_style());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_has_art() {
        for scene in Scene::all() {
            for frame in 0..FRAMES_PER_CYCLE as usize {
                let (_, lines) = scene_art(*scene, frame);
                assert!(!lines.is_empty());
            }
        }
    }

    #[test]
    fn test_rain_falls() {
        // A drop moves one row down per frame
        let x = 3;
        let y = (0..20).find(|y| is_raindrop(x, *y, 0)).unwrap();
        assert!(is_raindrop(x, y + 1, 1));
        assert!(!is_raindrop(x + 1, y, 0));
    }

    #[test]
    fn test_fireplace_stays_inside_narrow_scenes() {
        for width in 0..12 {
            let area = Rect::new(0, 1, width, 6);
            match fireplace_rect(area, 4) {
                Some(rect) => {
                    assert!(rect.right() <= area.right());
                    assert!(rect.bottom() <= area.bottom());
                }
                None => assert!(width <= 1),
            }
        }
        assert_eq!(fireplace_rect(Rect::new(0, 0, 40, 0), 4), None);
        assert_eq!(fireplace_rect(Rect::new(2, 0, 40, 10), 4), Some(Rect::new(3, 6, 8, 4)));
    }
}
