use crate::app::AppState;
use crate::domain::calendar::{is_today, WEEKDAY_LABELS};
use crate::domain::{month_view, MonthView, PanelId};
use crate::ui::panel_block;
use crate::ui::styles::{hint_style, title_style, today_style};
use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Month grid as lines: header row then one row per week
pub fn month_lines(view: &MonthView, today: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(
        WEEKDAY_LABELS
            .iter()
            .map(|label| Span::styled(format!("{:>4}", label), hint_style()))
            .collect::<Vec<_>>(),
    ));

    for week in view.weeks() {
        let cells: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(day) if is_today(view, *day, today) => {
                    Span::styled(format!("{:>4}", day), today_style())
                }
                Some(day) => Span::raw(format!("{:>4}", day)),
                None => Span::raw("    "),
            })
            .collect();
        lines.push(Line::from(cells));
    }
    lines
}

/// Render the calendar for the month in `app.calendar_date`
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let block = panel_block(PanelId::Calendar, focused, None);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = month_view(app.calendar_date);
    let today = chrono::Local::now().date_naive();

    let mut lines = vec![
        Line::from(Span::styled(format!("◀  {}  ▶", view.title()), title_style())),
        Line::raw(""),
    ];
    lines.extend(month_lines(&view, today));
    lines.push(Line::raw(""));
    lines.push(Line::styled("←/→ month  t today", hint_style()));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
