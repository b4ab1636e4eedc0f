pub mod calendar;
pub mod enums;
pub mod games;
pub mod panels;
pub mod pomodoro;
pub mod tracks;

pub use calendar::{month_view, next_month, previous_month, MonthView};
pub use enums::{PanelId, Scene, Screen, TimerPhase, TrackCategory, UiMode};
pub use games::{GameKind, Plushies, SootSprites};
pub use panels::{NavigationIntent, PanelVisibility};
pub use pomodoro::{PhaseCompletion, PomodoroTimer};
pub use tracks::{Track, TrackSelector};
