use crate::app::{AppState, SEEK_STEP, VOLUME_STEP};
use crate::domain::{GameKind, PanelId, Screen, TimerPhase, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::TodoInput => handle_todo_input_mode(app, key),
        UiMode::Normal => match app.screen {
            Screen::Home => handle_home_screen(app, key),
            Screen::Room => handle_room(app, key),
        },
    }
}

/// Handle mouse input: left clicks only
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        app.click(mouse.column, mouse.row);
    }
}

/// Terminal focus changed
pub fn handle_focus(app: &mut AppState, gained: bool) {
    if !gained {
        app.on_focus_lost();
    }
}

fn handle_home_screen(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => Ok(true),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.enter_room();
            Ok(false)
        }
        KeyCode::Char(c) => {
            if let Some(panel) = PanelId::from_dock_key(c) {
                app.press_dock(panel);
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Dock keys first, then whichever panel has focus
fn handle_room(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('h') => {
            app.navigate_home();
            return Ok(false);
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return Ok(false);
        }
        KeyCode::Char(c) => {
            if let Some(panel) = PanelId::from_dock_key(c) {
                app.press_dock(panel);
                return Ok(false);
            }
        }
        _ => {}
    }

    match app.focus {
        Some(PanelId::Music) => handle_music_keys(app, key),
        Some(PanelId::Pomodoro) => handle_pomodoro_keys(app, key),
        Some(PanelId::Calendar) => handle_calendar_keys(app, key),
        Some(PanelId::Todo) => handle_todo_keys(app, key),
        Some(PanelId::MiniGames) => handle_game_keys(app, key),
        Some(PanelId::Settings) => handle_settings_keys(app, key),
        None => {}
    }
    Ok(false)
}

fn handle_music_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.player.toggle_play(),
        KeyCode::Char('n') => app.player.next(),
        KeyCode::Char('b') => app.player.prev(),
        KeyCode::Char('a') => app.player.toggle_category(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_volume(VOLUME_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => app.change_volume(-VOLUME_STEP),
        KeyCode::Right => app.seek_by(SEEK_STEP),
        KeyCode::Left => app.seek_by(-SEEK_STEP),
        KeyCode::Char('z') => app.toggle_music_minimized(),
        KeyCode::Up => {
            let index = app.player.current_index();
            let len = app.player.tracks().len();
            app.player.select((index + len - 1) % len);
        }
        KeyCode::Down => {
            let index = app.player.current_index();
            app.player.select((index + 1) % app.player.tracks().len());
        }
        KeyCode::Esc => app.close_focused(),
        _ => {}
    }
}

fn handle_pomodoro_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.pomodoro.toggle(),
        KeyCode::Char('r') => app.pomodoro.reset(),
        KeyCode::Char('f') => app.switch_phase(TimerPhase::Focus),
        KeyCode::Char('b') => app.switch_phase(TimerPhase::Break),
        KeyCode::Esc => app.close_focused(),
        _ => {}
    }
}

fn handle_calendar_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('b') => app.calendar_prev(),
        KeyCode::Right | KeyCode::Char('n') => app.calendar_next(),
        KeyCode::Char('t') => app.calendar_today(),
        KeyCode::Esc => app.close_focused(),
        _ => {}
    }
}

fn handle_todo_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('i') => app.begin_todo_input(),
        KeyCode::Up => app.move_todo_selection(false),
        KeyCode::Down => app.move_todo_selection(true),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_todo(),
        KeyCode::Char('d') | KeyCode::Char('x') => app.remove_selected_todo(),
        KeyCode::Char('o') => app.toggle_account(),
        KeyCode::Esc => app.close_focused(),
        _ => {}
    }
}

/// Typing a new todo
fn handle_todo_input_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_todo_input(),
        KeyCode::Esc => app.cancel_todo_input(),
        KeyCode::Backspace => {
            app.todo_input.pop();
        }
        KeyCode::Char(c) => app.todo_input.push(c),
        _ => {}
    }
    Ok(false)
}

fn handle_game_keys(app: &mut AppState, key: KeyEvent) {
    if app.games.active.is_none() {
        match key.code {
            KeyCode::Char('s') => app.start_game(GameKind::SootSprites),
            KeyCode::Char('p') => app.start_game(GameKind::Plushies),
            KeyCode::Esc => app.close_focused(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Left => app.game_cursor(false),
        KeyCode::Right => app.game_cursor(true),
        KeyCode::Up => app.game_select(false),
        KeyCode::Down => app.game_select(true),
        KeyCode::Enter | KeyCode::Char(' ') => app.game_act(),
        KeyCode::Char('r') => {
            if let Some(kind) = app.games.active {
                app.start_game(kind);
            }
        }
        KeyCode::Esc => app.leave_game(),
        _ => {}
    }
}

fn handle_settings_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_scene_cursor(false),
        KeyCode::Down => app.move_scene_cursor(true),
        KeyCode::Enter => app.apply_scene(),
        KeyCode::Char('r') => app.toggle_rain(),
        KeyCode::Char('f') => app.toggle_fireplace(),
        KeyCode::Char('n') => app.toggle_notifications(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_volume(VOLUME_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => app.change_volume(-VOLUME_STEP),
        KeyCode::Right => app.change_animation_speed(true),
        KeyCode::Left => app.change_animation_speed(false),
        KeyCode::Esc => app.close_focused(),
        _ => {}
    }
}
