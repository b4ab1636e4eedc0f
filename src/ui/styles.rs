use crate::domain::TimerPhase;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the panel that receives keys
pub fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD)
}

/// Toast background style
pub fn toast_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Dock entry for a shown panel
pub fn dock_active_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn dock_idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Countdown colour per phase
pub fn phase_style(phase: TimerPhase) -> Style {
    let color = match phase {
        TimerPhase::Focus => Color::LightRed,
        TimerPhase::Break => Color::LightGreen,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Done/completed todo style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Today's cell in the calendar
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightMagenta)
        .add_modifier(Modifier::BOLD)
}

/// Visualizer bars
pub fn visualizer_style() -> Style {
    Style::default().fg(Color::LightMagenta)
}

pub fn rain_style() -> Style {
    Style::default().fg(Color::LightBlue)
}

pub fn fire_style() -> Style {
    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
}
