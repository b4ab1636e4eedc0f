use crate::app::AppState;
use crate::ui::styles::{title_style, toast_style};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 44;

/// Top-right corner box sized for `message`
pub fn toast_area(area: Rect, message: &str) -> Rect {
    let width = TOAST_WIDTH.min(area.width);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let rows = message.chars().count().div_ceil(text_width).max(1) as u16;
    let height = (rows + 2).min(area.height);
    Rect::new(area.x + area.width - width, area.y + 1u16.min(area.height - height), width, height)
}

/// Render the current toast, if any
pub fn render_toast(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let toast_rect = toast_area(area, &toast.message);

    // Clear the area behind the toast
    f.render_widget(Clear, toast_rect);

    let paragraph = Paragraph::new(toast.message.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" nook ", title_style()))
                .style(toast_style()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, toast_rect);
}
