use super::enums::PanelId;

/// Panels force-closed by the home button
const HOME_CLEARS: [PanelId; 3] = [PanelId::Calendar, PanelId::Pomodoro, PanelId::Todo];

/// What the shell should do after a navigation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Home,
}

/// Shown/hidden flags for every panel.
///
/// Only flags live here. Widget state is owned by the widgets, so hiding a
/// panel never resets what is inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelVisibility {
    shown: [bool; 6],
    music_minimized: bool,
}

impl PanelVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self, panel: PanelId) -> bool {
        self.shown[panel.index()]
    }

    /// Flip a panel. Other panels are left alone.
    pub fn toggle(&mut self, panel: PanelId) {
        let slot = &mut self.shown[panel.index()];
        *slot = !*slot;
    }

    pub fn open(&mut self, panel: PanelId) {
        self.shown[panel.index()] = true;
    }

    pub fn close(&mut self, panel: PanelId) {
        self.shown[panel.index()] = false;
    }

    /// Swap the full music player for the mini-player
    pub fn minimize_music(&mut self) {
        self.music_minimized = true;
    }

    pub fn restore_music(&mut self) {
        self.music_minimized = false;
    }

    pub fn is_music_minimized(&self) -> bool {
        self.music_minimized
    }

    /// Full music player is mounted
    pub fn shows_full_player(&self) -> bool {
        self.is_shown(PanelId::Music) && !self.music_minimized
    }

    /// Mini-player is mounted instead of the full player
    pub fn shows_mini_player(&self) -> bool {
        self.is_shown(PanelId::Music) && self.music_minimized
    }

    /// Shown panels in dock order
    pub fn shown_panels(&self) -> Vec<PanelId> {
        PanelId::all()
            .iter()
            .copied()
            .filter(|p| self.is_shown(*p))
            .collect()
    }

    /// Clear the calendar, pomodoro and todo panels and ask for home navigation
    pub fn navigate_home(&mut self) -> NavigationIntent {
        for panel in HOME_CLEARS {
            self.close(panel);
        }
        NavigationIntent::Home
    }
}
