use crate::app::AppState;
use crate::ui::styles::{hint_style, title_style};
use chrono::{DateTime, Datelike, Local, TimeZone};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Time, weekday and date as shown in the header
pub struct ClockText {
    pub time: String,
    pub weekday: String,
    pub date: String,
}

pub fn clock_text<Tz: TimeZone>(now: &DateTime<Tz>) -> ClockText
where
    Tz::Offset: std::fmt::Display,
{
    ClockText {
        time: now.format("%I:%M %p").to_string(),
        weekday: now.format("%A").to_string(),
        date: format!("{} {}, {}", now.format("%B"), now.day(), now.year()),
    }
}

/// Render the date/time header bar
pub fn render_clock(f: &mut Frame, app: &AppState, area: Rect) {
    let clock = clock_text(&Local::now());

    let mut spans = vec![
        Span::styled(format!(" {} ", clock.time), title_style()),
        Span::raw(format!(" {}  {}", clock.weekday, clock.date)),
    ];
    if app.pomodoro.running {
        spans.push(Span::styled(
            format!("   {} {}", app.pomodoro.phase.symbol(), app.pomodoro.display()),
            hint_style(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Left), area);
}
