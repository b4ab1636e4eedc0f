use crate::app::AppState;
use crate::domain::games::PLUSHIE_COUNT;
use crate::domain::{GameKind, PanelId, Plushies, SootSprites};
use crate::ui::panel_block;
use crate::ui::styles::{hint_style, selected_style, title_style};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPRITE_GLYPH: &str = "●";
const PLUSHIE_GLYPHS: [&str; PLUSHIE_COUNT] = ["Ⓐ", "Ⓑ", "Ⓒ", "Ⓓ", "Ⓔ"];

/// Render the mini-games panel: picker or the running game
pub fn render_games_pane(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let title = app.games.active.map(|kind| kind.name());
    let block = panel_block(PanelId::MiniGames, focused, title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.games.active {
        None => render_picker(f, inner),
        Some(GameKind::SootSprites) => render_soot(f, &app.games.soot, inner),
        Some(GameKind::Plushies) => render_plushies(f, &app.games.plushies, inner),
    }
}

fn render_picker(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("[s] ", title_style()),
            Span::raw(GameKind::SootSprites.name()),
        ]),
        Line::styled("    Sweep away every soot sprite", hint_style()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[p] ", title_style()),
            Span::raw(GameKind::Plushies.name()),
        ]),
        Line::styled("    Put each plushie on its own shelf", hint_style()),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Map a percentage position into a cell of `area`
fn field_cell(area: Rect, x_pct: f32, y_pct: f32) -> (u16, u16) {
    let x = area.x + ((x_pct / 100.0) * area.width.saturating_sub(1) as f32) as u16;
    let y = area.y + ((y_pct / 100.0) * area.height.saturating_sub(1) as f32) as u16;
    (x, y)
}

fn render_soot(f: &mut Frame, game: &SootSprites, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let status = if game.active {
        format!("Score: {}   Left: {}", game.score, game.remaining().len())
    } else {
        format!("All clean! Score: {}   r play again", game.score)
    };
    f.render_widget(Paragraph::new(status).style(title_style()), chunks[0]);

    let target = game.remaining().get(game.cursor).map(|s| s.id);
    let field = chunks[1];
    draw_sprites(f.buffer_mut(), game, target, field);

    f.render_widget(
        Paragraph::new("←/→ pick  Enter clean  Esc back").style(hint_style()),
        chunks[2],
    );
}

fn draw_sprites(buffer: &mut Buffer, game: &SootSprites, target: Option<usize>, field: Rect) {
    if field.width == 0 || field.height == 0 {
        return;
    }
    for sprite in game.sprites.iter().filter(|s| !s.cleaned) {
        let (x, y) = field_cell(field, sprite.x, sprite.y);
        let style = if Some(sprite.id) == target {
            selected_style()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        buffer.set_string(x, y, SPRITE_GLYPH, style);
    }
}

fn render_plushies(f: &mut Frame, game: &Plushies, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let status = if game.complete {
        "Perfectly arranged!   r play again".to_string()
    } else {
        match game.selected {
            Some(id) => format!("Holding {}", PLUSHIE_GLYPHS[id]),
            None => "↑/↓ pick up a plushie".to_string(),
        }
    };
    f.render_widget(Paragraph::new(status).style(title_style()), chunks[0]);

    let mut lines = vec![Line::raw("")];
    for slot in 0..PLUSHIE_COUNT {
        let occupants: String = game
            .in_slot(slot)
            .iter()
            .map(|p| {
                if p.rotation == 0.0 {
                    PLUSHIE_GLYPHS[p.id].to_string()
                } else {
                    format!("{}~", PLUSHIE_GLYPHS[p.id])
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let label = format!(" shelf {} [{:^7}] ", PLUSHIE_GLYPHS[slot], occupants);
        let style = if slot == game.slot_cursor {
            selected_style()
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

    f.render_widget(
        Paragraph::new("↑/↓ select  ←/→ shelf  Enter place  Esc back").style(hint_style()),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cell_stays_inside() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(field_cell(area, 0.0, 0.0), (10, 5));
        assert_eq!(field_cell(area, 100.0, 100.0), (29, 14));
    }
}
