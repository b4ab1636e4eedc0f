/// Phase-complete cue: terminal bell everywhere, desktop notification on macOS

use crate::domain::TimerPhase;
use std::io::Write;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Message shown when `finished` ends and `next` begins
pub fn phase_message(finished: TimerPhase, next: TimerPhase) -> String {
    match finished {
        TimerPhase::Focus => format!("Focus session complete. Time for a {}.", next.name().to_lowercase()),
        TimerPhase::Break => "Break is over. Back to focus.".to_string(),
    }
}

/// Ring the bell and raise a notification for a finished phase
pub fn notify_phase_complete(finished: TimerPhase, next: TimerPhase) {
    let message = phase_message(finished, next);
    tracing::info!(phase = finished.name(), "pomodoro phase complete");

    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Nook - Pomodoro""#,
            message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = message;
    }
}
