use std::time::{Duration, Instant};

/// Frame interval in milliseconds (visualizer refresh rate)
pub const DEFAULT_FRAME_MS: u64 = 100;

/// Length of one timer tick
pub const TICK: Duration = Duration::from_secs(1);

/// Get frame duration
pub fn frame_duration() -> Duration {
    Duration::from_millis(DEFAULT_FRAME_MS)
}

/// Source of one-second ticks for the pomodoro timer
pub trait TickSource {
    /// Number of whole ticks elapsed since the previous poll
    fn poll_ticks(&mut self) -> u32;

    /// Drop any partial progress so the next tick is a full interval away
    fn restart(&mut self);
}

/// Wall-clock tick source
pub struct SecondTicker {
    last: Instant,
    carry: Duration,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
        }
    }
}

impl Default for SecondTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SecondTicker {
    fn poll_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let total = self.carry + now.duration_since(self.last);
        self.last = now;

        let ticks = (total.as_millis() / TICK.as_millis()) as u32;
        self.carry = total - TICK * ticks;
        ticks
    }

    fn restart(&mut self) {
        self.last = Instant::now();
        self.carry = Duration::ZERO;
    }
}

/// Manually fed tick source for deterministic timing
#[derive(Debug, Default)]
pub struct ManualTicks {
    pending: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue ticks to be returned by the next poll
    pub fn push(&mut self, ticks: u32) {
        self.pending += ticks;
    }
}

impl TickSource for ManualTicks {
    fn poll_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    fn restart(&mut self) {
        self.pending = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let duration = frame_duration();
        assert_eq!(duration, Duration::from_millis(100));
    }

    #[test]
    fn test_manual_ticks_drain_on_poll() {
        let mut ticks = ManualTicks::new();
        ticks.push(3);
        ticks.push(2);
        assert_eq!(ticks.poll_ticks(), 5);
        assert_eq!(ticks.poll_ticks(), 0);
    }

    #[test]
    fn test_manual_ticks_restart_discards_pending() {
        let mut ticks = ManualTicks::new();
        ticks.push(4);
        ticks.restart();
        assert_eq!(ticks.poll_ticks(), 0);
    }

    #[test]
    fn test_second_ticker_starts_empty() {
        let mut ticker = SecondTicker::new();
        assert_eq!(ticker.poll_ticks(), 0);
    }
}
