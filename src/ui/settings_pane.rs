use crate::app::AppState;
use crate::domain::{PanelId, Scene};
use crate::ui::panel_block;
use crate::ui::styles::{hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn toggle_label(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn percent(volume: f32) -> String {
    format!("{:>3}%", (volume * 100.0).round() as u32)
}

/// Render the room settings panel
pub fn render_settings_pane(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let block = panel_block(PanelId::Settings, focused, None);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::styled("Scene", title_style())];
    for (i, scene) in Scene::all().iter().enumerate() {
        let marker = if *scene == app.settings.scene { "●" } else { "○" };
        let label = format!(" {} {} ", marker, scene.name());
        lines.push(if i == app.scene_cursor && focused {
            Line::from(Span::styled(label, selected_style()))
        } else {
            Line::raw(label)
        });
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Atmosphere", title_style()));
    lines.push(Line::raw(format!(" Rain       {}", toggle_label(app.settings.raining))));
    lines.push(Line::raw(format!(" Fireplace  {}", toggle_label(app.settings.fireplace))));
    lines.push(Line::raw(format!(" Animation  {}%", app.settings.animation_speed)));
    lines.push(Line::raw(""));
    lines.push(Line::styled("General", title_style()));
    lines.push(Line::raw(format!(" Volume     {}", percent(app.settings.volume))));
    lines.push(Line::raw(format!(
        " Notify     {}",
        toggle_label(app.settings.sound_cue)
    )));
    lines.push(Line::raw(""));
    lines.push(Line::styled("↑/↓ Enter scene  r rain  f fire", hint_style()));
    lines.push(Line::styled("←/→ speed  +/- volume  n notify", hint_style()));

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.7), " 70%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.0), "  0%");
    }
}
