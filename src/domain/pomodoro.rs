use super::enums::TimerPhase;
use crate::ticker::TickSource;

/// Focus phase length in seconds
pub const FOCUS_SECONDS: u32 = 25 * 60;
/// Break phase length in seconds
pub const BREAK_SECONDS: u32 = 5 * 60;

/// Emitted when a phase counts down to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompletion {
    /// The phase that just finished
    pub finished: TimerPhase,
    /// The phase now loaded
    pub next: TimerPhase,
}

pub fn phase_duration(phase: TimerPhase) -> u32 {
    match phase {
        TimerPhase::Focus => FOCUS_SECONDS,
        TimerPhase::Break => BREAK_SECONDS,
    }
}

/// Focus/break countdown driven by an injected tick source
pub struct PomodoroTimer {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub completed_cycles: u32,
    ticks: Box<dyn TickSource>,
}

impl PomodoroTimer {
    pub fn new(ticks: Box<dyn TickSource>) -> Self {
        Self {
            phase: TimerPhase::Focus,
            remaining_seconds: FOCUS_SECONDS,
            running: false,
            completed_cycles: 0,
            ticks,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.ticks.restart();
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and return to a fresh focus phase. Completed cycles are kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = TimerPhase::Focus;
        self.remaining_seconds = FOCUS_SECONDS;
    }

    /// Load a phase immediately, discarding the current countdown
    pub fn switch_phase(&mut self, phase: TimerPhase) {
        self.phase = phase;
        self.remaining_seconds = phase_duration(phase);
        self.running = false;
    }

    /// Apply one tick
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let finished = self.phase;
        let next = match finished {
            TimerPhase::Focus => {
                self.completed_cycles += 1;
                TimerPhase::Break
            }
            TimerPhase::Break => TimerPhase::Focus,
        };
        self.phase = next;
        self.remaining_seconds = phase_duration(next);
        self.running = false;

        Some(PhaseCompletion { finished, next })
    }

    /// Drain the tick source and apply whatever elapsed.
    /// Ticks that land while paused are dropped.
    pub fn advance(&mut self) -> Option<PhaseCompletion> {
        let ticks = self.ticks.poll_ticks();
        let mut completion = None;
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            if let Some(done) = self.tick() {
                completion = Some(done);
            }
        }
        completion
    }

    /// Remaining time as "MM:SS"
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Fraction of the current phase already spent (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f64 {
        let total = phase_duration(self.phase) as f64;
        1.0 - self.remaining_seconds as f64 / total
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualTicks;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Tick source the test keeps a handle to
    #[derive(Clone, Default)]
    struct SharedTicks(Rc<RefCell<ManualTicks>>);

    impl SharedTicks {
        fn push(&self, n: u32) {
            self.0.borrow_mut().push(n);
        }
    }

    impl TickSource for SharedTicks {
        fn poll_ticks(&mut self) -> u32 {
            self.0.borrow_mut().poll_ticks()
        }

        fn restart(&mut self) {
            self.0.borrow_mut().restart();
        }
    }

    fn timer() -> PomodoroTimer {
        PomodoroTimer::new(Box::new(ManualTicks::new()))
    }

    #[test]
    fn test_new_timer_is_idle_focus() {
        let t = timer();
        assert_eq!(t.phase, TimerPhase::Focus);
        assert_eq!(t.remaining_seconds, 1500);
        assert!(!t.running);
        assert_eq!(t.completed_cycles, 0);
        assert_eq!(t.display(), "25:00");
    }

    #[test]
    fn test_full_focus_phase_rolls_into_break() {
        let mut t = timer();
        t.start();

        let mut completions = Vec::new();
        for _ in 0..1500 {
            if let Some(c) = t.tick() {
                completions.push(c);
            }
        }

        assert_eq!(t.phase, TimerPhase::Break);
        assert_eq!(t.remaining_seconds, 300);
        assert!(!t.running);
        assert_eq!(t.completed_cycles, 1);
        assert_eq!(
            completions,
            vec![PhaseCompletion {
                finished: TimerPhase::Focus,
                next: TimerPhase::Break
            }]
        );
    }

    #[test]
    fn test_break_completion_returns_to_focus_without_cycle() {
        let mut t = timer();
        t.switch_phase(TimerPhase::Break);
        t.start();
        for _ in 0..300 {
            t.tick();
        }
        assert_eq!(t.phase, TimerPhase::Focus);
        assert_eq!(t.remaining_seconds, 1500);
        assert!(!t.running);
        assert_eq!(t.completed_cycles, 0);
    }

    #[test]
    fn test_switch_phase_while_running() {
        let mut t = timer();
        t.start();
        for _ in 0..42 {
            t.tick();
        }
        t.switch_phase(TimerPhase::Break);
        assert_eq!(t.remaining_seconds, 300);
        assert!(!t.running);
    }

    #[test]
    fn test_paused_timer_ignores_ticks() {
        let mut t = timer();
        assert_eq!(t.tick(), None);
        assert_eq!(t.remaining_seconds, 1500);
    }

    #[test]
    fn test_reset_keeps_cycles() {
        let mut t = timer();
        t.start();
        for _ in 0..1500 {
            t.tick();
        }
        t.start();
        t.tick();
        t.reset();
        assert_eq!(t.phase, TimerPhase::Focus);
        assert_eq!(t.remaining_seconds, 1500);
        assert!(!t.running);
        assert_eq!(t.completed_cycles, 1);
    }

    #[test]
    fn test_advance_uses_injected_ticks() {
        let ticks = SharedTicks::default();
        let mut t = PomodoroTimer::new(Box::new(ticks.clone()));
        t.start();

        ticks.push(65);
        assert_eq!(t.advance(), None);
        assert_eq!(t.display(), "23:55");
    }

    #[test]
    fn test_advance_stops_at_phase_end() {
        let ticks = SharedTicks::default();
        let mut t = PomodoroTimer::new(Box::new(ticks.clone()));
        t.start();

        ticks.push(1600);
        let done = t.advance();
        assert_eq!(done.map(|c| c.finished), Some(TimerPhase::Focus));
        // Leftover ticks are not carried into the break
        assert_eq!(t.remaining_seconds, 300);
        assert!(!t.running);
    }

    #[test]
    fn test_ticks_while_paused_are_dropped() {
        let ticks = SharedTicks::default();
        let mut t = PomodoroTimer::new(Box::new(ticks.clone()));

        ticks.push(10);
        t.advance();
        t.start();
        t.advance();
        assert_eq!(t.remaining_seconds, 1500);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(1499), "24:59");
    }

    #[test]
    fn test_progress_ratio() {
        let mut t = timer();
        assert_eq!(t.progress_ratio(), 0.0);
        t.remaining_seconds = 750;
        assert!((t.progress_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
