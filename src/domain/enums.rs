use serde::{Deserialize, Serialize};

/// Floating panels that can be shown over the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Music,
    MiniGames,
    Settings,
    Calendar,
    Pomodoro,
    Todo,
}

impl PanelId {
    /// All panels in dock order
    pub fn all() -> &'static [PanelId] {
        &[
            PanelId::Music,
            PanelId::MiniGames,
            PanelId::Settings,
            PanelId::Calendar,
            PanelId::Pomodoro,
            PanelId::Todo,
        ]
    }

    /// Position in dock order
    pub fn index(&self) -> usize {
        match self {
            PanelId::Music => 0,
            PanelId::MiniGames => 1,
            PanelId::Settings => 2,
            PanelId::Calendar => 3,
            PanelId::Pomodoro => 4,
            PanelId::Todo => 5,
        }
    }

    /// Display name for pane titles and the dock
    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Music => "Music",
            PanelId::MiniGames => "Games",
            PanelId::Settings => "Settings",
            PanelId::Calendar => "Calendar",
            PanelId::Pomodoro => "Pomodoro",
            PanelId::Todo => "Todo",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PanelId::Music => "♪",
            PanelId::MiniGames => "✦",
            PanelId::Settings => "⚙",
            PanelId::Calendar => "▦",
            PanelId::Pomodoro => "⏱",
            PanelId::Todo => "☑",
        }
    }

    /// Dock key that toggles this panel
    pub fn dock_key(&self) -> char {
        match self {
            PanelId::Music => '1',
            PanelId::MiniGames => '2',
            PanelId::Settings => '3',
            PanelId::Calendar => '4',
            PanelId::Pomodoro => '5',
            PanelId::Todo => '6',
        }
    }

    pub fn from_dock_key(key: char) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.dock_key() == key)
    }
}

/// Pomodoro phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Focus,
    Break,
}

impl TimerPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TimerPhase::Focus => "Focus",
            TimerPhase::Break => "Break",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimerPhase::Focus => "🧠",
            TimerPhase::Break => "☕",
        }
    }
}

/// Which track list a track belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackCategory {
    Music,
    Ambient,
}

impl TrackCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TrackCategory::Music => "Music",
            TrackCategory::Ambient => "Ambient",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            TrackCategory::Music => TrackCategory::Ambient,
            TrackCategory::Ambient => TrackCategory::Music,
        }
    }
}

/// Background environment of the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    #[default]
    Cottage,
    Meadow,
    Sky,
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Cottage => "Country Cottage",
            Scene::Meadow => "Ghibli Meadow",
            Scene::Sky => "Ghibli Sky",
        }
    }

    pub fn all() -> &'static [Scene] {
        &[Scene::Cottage, Scene::Meadow, Scene::Sky]
    }
}

/// Which top-level screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Landing screen reached through the home button
    Home,
    /// The relaxation room with its panels
    Room,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing a new todo; every printable key goes to the input buffer
    TodoInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_dock_keys_round_trip() {
        for panel in PanelId::all() {
            assert_eq!(PanelId::from_dock_key(panel.dock_key()), Some(*panel));
        }
        assert_eq!(PanelId::from_dock_key('9'), None);
    }

    #[test]
    fn test_panel_index_matches_dock_order() {
        for (i, panel) in PanelId::all().iter().enumerate() {
            assert_eq!(panel.index(), i);
        }
    }

    #[test]
    fn test_track_category_other() {
        assert_eq!(TrackCategory::Music.other(), TrackCategory::Ambient);
        assert_eq!(TrackCategory::Ambient.other(), TrackCategory::Music);
    }

    #[test]
    fn test_scene_serde_lowercase() {
        let json = serde_json::to_string(&Scene::Meadow).unwrap();
        assert_eq!(json, "\"meadow\"");
        let scene: Scene = serde_json::from_str("\"sky\"").unwrap();
        assert_eq!(scene, Scene::Sky);
    }
}
