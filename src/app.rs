use crate::domain::{
    next_month, previous_month, GameKind, NavigationIntent, PanelId, PanelVisibility, PhaseCompletion,
    Plushies, PomodoroTimer, Scene, Screen, SootSprites, TimerPhase, UiMode,
};
use crate::notifications;
use crate::persistence::{save_settings, Settings, MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED};
use crate::player::{Player, Visualizer};
use crate::ticker::TickSource;
use crate::todo::{AuthContext, Identity, TodoStore};
use anyhow::Result;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Volume change per keypress
pub const VOLUME_STEP: f32 = 0.05;

/// Seek step as a fraction of the track
pub const SEEK_STEP: f64 = 0.1;

/// Animation speed change per keypress, in percent
pub const ANIMATION_SPEED_STEP: u16 = 10;

/// Short-lived message drawn over the room
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_DURATION
    }
}

/// Mini-games panel state
#[derive(Debug, Clone, Default)]
pub struct GamesState {
    /// Game being played, None on the picker
    pub active: Option<GameKind>,
    pub soot: SootSprites,
    pub plushies: Plushies,
}

/// Sign-in target for the synced todo list
#[derive(Clone)]
pub struct Account {
    pub auth: AuthContext,
    pub identity: Identity,
}

/// Clickable regions recorded during render
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub progress_bar: Option<Rect>,
    pub dock: Vec<(PanelId, Rect)>,
    pub home: Option<Rect>,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Main application state
pub struct AppState {
    pub screen: Screen,
    pub ui_mode: UiMode,
    pub panels: PanelVisibility,
    /// Shown panel that receives panel keys
    pub focus: Option<PanelId>,
    pub pomodoro: PomodoroTimer,
    pub player: Player,
    pub visualizer: Visualizer,
    pub todos: Box<dyn TodoStore>,
    pub account: Option<Account>,
    pub todo_input: String,
    pub todo_selected: usize,
    /// Any day of the month the calendar shows
    pub calendar_date: NaiveDate,
    pub games: GamesState,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    /// Highlighted row in the scene list
    pub scene_cursor: usize,
    pub toast: Option<Toast>,
    pub hit_areas: HitAreas,
    pub needs_save: bool,

    // Animation frame counter for the scene (advances with animation_speed)
    pub animation_frame: u32,
    /// Percent of a frame carried into the next tick
    animation_carry: u32,
    rng: StdRng,
}

impl AppState {
    pub fn new(
        settings: Settings,
        player: Player,
        todos: Box<dyn TodoStore>,
        ticks: Box<dyn TickSource>,
    ) -> Self {
        let scene_cursor = Scene::all()
            .iter()
            .position(|s| *s == settings.scene)
            .unwrap_or(0);

        Self {
            screen: Screen::Room,
            ui_mode: UiMode::Normal,
            panels: PanelVisibility::new(),
            focus: None,
            pomodoro: PomodoroTimer::new(ticks),
            player,
            visualizer: Visualizer::new(),
            todos,
            account: None,
            todo_input: String::new(),
            todo_selected: 0,
            calendar_date: chrono::Local::now().date_naive(),
            games: GamesState::default(),
            settings,
            settings_path: None,
            scene_cursor,
            toast: None,
            hit_areas: HitAreas::default(),
            needs_save: false,
            animation_frame: 0,
            animation_carry: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Advance everything that moves on its own. Called once per frame.
    pub fn tick(&mut self) {
        self.advance_animation();

        if let Some(completion) = self.pomodoro.advance() {
            self.on_phase_complete(completion);
        }

        self.player.pump_media();
        if !self.player.using_external_video() {
            self.visualizer.refresh(self.player.is_playing, &mut self.rng);
        }

        self.expire_toast(Instant::now());

        self.todos.sync();
        self.clamp_todo_selection();
    }

    /// Move the scene animation by `animation_speed` percent of a frame
    fn advance_animation(&mut self) {
        let total = self.animation_carry + u32::from(self.settings.animation_speed);
        self.animation_frame = self.animation_frame.wrapping_add(total / 100);
        self.animation_carry = total % 100;
    }

    fn on_phase_complete(&mut self, completion: PhaseCompletion) {
        self.show_toast(notifications::phase_message(completion.finished, completion.next));
        if self.settings.sound_cue {
            notifications::notify_phase_complete(completion.finished, completion.next);
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    // Panels

    /// Dock button: Settings only opens, every other panel toggles
    pub fn press_dock(&mut self, panel: PanelId) {
        self.screen = Screen::Room;
        if panel == PanelId::Settings {
            self.panels.open(panel);
            self.focus = Some(panel);
            return;
        }

        self.panels.toggle(panel);
        if self.panels.is_shown(panel) {
            self.focus = Some(panel);
        } else {
            self.refocus();
        }
    }

    pub fn close_panel(&mut self, panel: PanelId) {
        self.panels.close(panel);
        self.refocus();
    }

    /// Esc in the room: close whatever has focus
    pub fn close_focused(&mut self) {
        if let Some(panel) = self.focus {
            self.close_panel(panel);
        }
    }

    /// Keep focus on a shown panel, falling back to the last one in dock order
    fn refocus(&mut self) {
        if self.focus.is_some_and(|p| self.panels.is_shown(p)) {
            return;
        }
        self.focus = self.panels.shown_panels().last().copied();
    }

    pub fn cycle_focus(&mut self) {
        let shown = self.panels.shown_panels();
        if shown.is_empty() {
            self.focus = None;
            return;
        }
        let next = match self.focus.and_then(|p| shown.iter().position(|s| *s == p)) {
            Some(i) => (i + 1) % shown.len(),
            None => 0,
        };
        self.focus = Some(shown[next]);
    }

    pub fn navigate_home(&mut self) {
        match self.panels.navigate_home() {
            NavigationIntent::Home => {
                self.screen = Screen::Home;
                self.ui_mode = UiMode::Normal;
                self.todo_input.clear();
                self.refocus();
            }
        }
    }

    pub fn enter_room(&mut self) {
        self.screen = Screen::Room;
    }

    pub fn toggle_music_minimized(&mut self) {
        if self.panels.is_music_minimized() {
            self.panels.restore_music();
        } else {
            self.panels.minimize_music();
            self.player.reassert_playback();
        }
    }

    // Music

    pub fn change_volume(&mut self, delta: f32) {
        self.player.set_volume(self.player.volume + delta);
        self.settings.volume = self.player.volume;
        self.needs_save = true;
    }

    pub fn seek_by(&mut self, delta: f64) {
        let target = self.player.progress_ratio() + delta;
        if !self.player.seek_fraction(target) {
            self.show_toast("Seeking is not available for this track");
        }
    }

    /// Terminal lost focus, the closest thing to the page being hidden
    pub fn on_focus_lost(&mut self) {
        self.player.reassert_playback();
    }

    /// Mouse click at a terminal cell
    pub fn click(&mut self, column: u16, row: u16) {
        if let Some(bar) = self.hit_areas.progress_bar {
            if contains(bar, column, row) && bar.width > 0 {
                let fraction = f64::from(column - bar.x) / f64::from(bar.width);
                self.player.seek_fraction(fraction);
                return;
            }
        }
        if self.hit_areas.home.is_some_and(|area| contains(area, column, row)) {
            self.navigate_home();
            return;
        }
        let hit = self
            .hit_areas
            .dock
            .iter()
            .find(|(_, area)| contains(*area, column, row))
            .map(|(panel, _)| *panel);
        if let Some(panel) = hit {
            self.press_dock(panel);
        }
    }

    // Pomodoro

    pub fn switch_phase(&mut self, phase: TimerPhase) {
        self.pomodoro.switch_phase(phase);
    }

    // Todo

    pub fn begin_todo_input(&mut self) {
        self.todo_input.clear();
        self.ui_mode = UiMode::TodoInput;
    }

    pub fn cancel_todo_input(&mut self) {
        self.todo_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Add the typed todo; blank input just leaves the form
    pub fn submit_todo_input(&mut self) {
        let text = std::mem::take(&mut self.todo_input);
        self.ui_mode = UiMode::Normal;
        let before = self.todos.items().len();
        self.todos.add(&text);
        if self.todos.items().len() > before {
            self.todo_selected = self.todos.items().len() - 1;
        }
    }

    pub fn move_todo_selection(&mut self, down: bool) {
        let len = self.todos.items().len();
        if len == 0 {
            return;
        }
        self.todo_selected = if down {
            (self.todo_selected + 1).min(len - 1)
        } else {
            self.todo_selected.saturating_sub(1)
        };
    }

    pub fn toggle_selected_todo(&mut self) {
        if let Some(id) = self.todos.items().get(self.todo_selected).map(|i| i.id) {
            self.todos.toggle(id);
        }
    }

    pub fn remove_selected_todo(&mut self) {
        if let Some(id) = self.todos.items().get(self.todo_selected).map(|i| i.id) {
            self.todos.remove(id);
            self.clamp_todo_selection();
        }
    }

    fn clamp_todo_selection(&mut self) {
        let len = self.todos.items().len();
        self.todo_selected = self.todo_selected.min(len.saturating_sub(1));
    }

    /// Sign in with the configured identity, or out if already signed in
    pub fn toggle_account(&mut self) {
        let Some(account) = self.account.clone() else {
            self.show_toast("Todo sync is not configured");
            return;
        };
        if account.auth.current_identity().is_some() {
            account.auth.sign_out();
            self.show_toast("Signed out");
        } else {
            account.auth.sign_in(account.identity.clone());
            self.show_toast(format!("Signed in as {}", account.identity.user_id));
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.account
            .as_ref()
            .is_some_and(|a| a.auth.current_identity().is_some())
    }

    // Calendar

    pub fn calendar_prev(&mut self) {
        self.calendar_date = previous_month(self.calendar_date);
    }

    pub fn calendar_next(&mut self) {
        self.calendar_date = next_month(self.calendar_date);
    }

    pub fn calendar_today(&mut self) {
        self.calendar_date = chrono::Local::now().date_naive();
    }

    // Games

    pub fn start_game(&mut self, kind: GameKind) {
        match kind {
            GameKind::SootSprites => self.games.soot.start(&mut self.rng),
            GameKind::Plushies => self.games.plushies.start(&mut self.rng),
        }
        self.games.active = Some(kind);
    }

    pub fn leave_game(&mut self) {
        self.games.active = None;
    }

    pub fn game_cursor(&mut self, forward: bool) {
        match self.games.active {
            Some(GameKind::SootSprites) => self.games.soot.move_cursor(forward),
            Some(GameKind::Plushies) => self.games.plushies.move_slot_cursor(forward),
            None => {}
        }
    }

    /// Cycle the selected plushie
    pub fn game_select(&mut self, forward: bool) {
        if self.games.active != Some(GameKind::Plushies) {
            return;
        }
        let plushies = &mut self.games.plushies;
        let len = plushies.plushies.len();
        if len == 0 {
            return;
        }
        match (forward, plushies.selected) {
            (false, Some(id)) => plushies.select((id + len - 1) % len),
            (false, None) => plushies.select(len - 1),
            (true, _) => plushies.select_next(),
        }
    }

    /// Clean the sprite under the cursor, or drop the selected plushie into the slot under it
    pub fn game_act(&mut self) {
        match self.games.active {
            Some(GameKind::SootSprites) => {
                if self.games.soot.clean_at_cursor() {
                    let score = self.games.soot.score;
                    self.show_toast(format!("All soot sprites cleaned! Score: {score}"));
                }
            }
            Some(GameKind::Plushies) => {
                let slot = self.games.plushies.slot_cursor;
                if self.games.plushies.move_selected(slot) {
                    self.show_toast("Plushies arranged perfectly!");
                }
            }
            None => {}
        }
    }

    // Settings

    pub fn move_scene_cursor(&mut self, down: bool) {
        let len = Scene::all().len();
        self.scene_cursor = if down {
            (self.scene_cursor + 1) % len
        } else {
            (self.scene_cursor + len - 1) % len
        };
    }

    pub fn apply_scene(&mut self) {
        if let Some(scene) = Scene::all().get(self.scene_cursor) {
            self.settings.scene = *scene;
            self.needs_save = true;
        }
    }

    pub fn toggle_rain(&mut self) {
        self.settings.raining = !self.settings.raining;
        self.needs_save = true;
    }

    pub fn toggle_fireplace(&mut self) {
        self.settings.fireplace = !self.settings.fireplace;
        self.needs_save = true;
    }

    pub fn toggle_notifications(&mut self) {
        self.settings.sound_cue = !self.settings.sound_cue;
        self.needs_save = true;
    }

    pub fn change_animation_speed(&mut self, faster: bool) {
        let speed = if faster {
            self.settings.animation_speed.saturating_add(ANIMATION_SPEED_STEP)
        } else {
            self.settings.animation_speed.saturating_sub(ANIMATION_SPEED_STEP)
        };
        self.settings.animation_speed = speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
        self.needs_save = true;
    }

    /// Write settings if anything changed
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.settings_path {
            save_settings(path, &self.settings)?;
        }
        self.needs_save = false;
        Ok(())
    }
}
