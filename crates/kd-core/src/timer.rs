//! Session timer
//!
//! The timer is a pure function of the time reported by a [`Clock`]. It is
//! polled with [`SessionTimer::tick`] once per second by the presentation
//! layer; nothing here spawns threads or schedules work.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Default session length before the time display is frozen
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Text shown in place of the time once the display is frozen
pub const HIDDEN_TIME: &str = "-";

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// What the time display currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDisplay {
    /// Not started yet
    Idle,
    /// Counting up
    Running(Duration),
    /// Stopped, last value kept
    Stopped(Duration),
    /// Stopped and replaced by the sentinel
    Hidden,
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeDisplay::Idle => f.write_str(&format_elapsed(Duration::ZERO)),
            TimeDisplay::Running(d) | TimeDisplay::Stopped(d) => f.write_str(&format_elapsed(*d)),
            TimeDisplay::Hidden => f.write_str(HIDDEN_TIME),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running { started: Instant },
    Stopped { elapsed: Duration },
    Hidden { elapsed: Duration },
}

/// Elapsed-time tracker for one practice session
#[derive(Clone)]
pub struct SessionTimer {
    clock: Arc<dyn Clock>,
    timeout: Duration,
    state: TimerState,
}

impl SessionTimer {
    /// Create a stopped timer
    pub fn new(clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            clock,
            timeout,
            state: TimerState::Idle,
        }
    }

    /// Start (or restart) counting from zero
    pub fn start(&mut self) {
        self.state = TimerState::Running {
            started: self.clock.now(),
        };
    }

    /// Time counted so far. Frozen once stopped or hidden.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Idle => Duration::ZERO,
            TimerState::Running { started } => self.clock.now().saturating_duration_since(started),
            TimerState::Stopped { elapsed } | TimerState::Hidden { elapsed } => elapsed,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.state, TimerState::Hidden { .. })
    }

    /// Stop counting and keep the last value on display
    pub fn stop(&mut self) {
        if let TimerState::Running { .. } = self.state {
            self.state = TimerState::Stopped {
                elapsed: self.elapsed(),
            };
        }
    }

    /// Stop counting and show the sentinel instead of the time
    pub fn hide(&mut self) {
        match self.state {
            TimerState::Running { .. } | TimerState::Stopped { .. } => {
                self.state = TimerState::Hidden {
                    elapsed: self.elapsed(),
                };
            }
            TimerState::Idle | TimerState::Hidden { .. } => {}
        }
    }

    /// Periodic poll. Returns true when this tick hit the timeout.
    pub fn tick(&mut self) -> bool {
        if self.is_running() && self.elapsed() >= self.timeout {
            self.hide();
            return true;
        }
        false
    }

    pub fn display(&self) -> TimeDisplay {
        match self.state {
            TimerState::Idle => TimeDisplay::Idle,
            TimerState::Running { .. } => TimeDisplay::Running(self.elapsed()),
            TimerState::Stopped { elapsed } => TimeDisplay::Stopped(elapsed),
            TimerState::Hidden { .. } => TimeDisplay::Hidden,
        }
    }
}

impl fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTimer")
            .field("timeout", &self.timeout)
            .field("state", &self.state)
            .finish()
    }
}

/// Format a duration as `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> (ManualClock, SessionTimer) {
        let clock = ManualClock::new();
        let timer = SessionTimer::new(Arc::new(clock.clone()), DEFAULT_TIMEOUT);
        (clock, timer)
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "01:15");
        assert_eq!(format_elapsed(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_elapsed(Duration::from_secs(3661)), "1:01:01");
    }

    #[test]
    fn test_running_timer_follows_clock() {
        let (clock, mut timer) = timer();
        assert_eq!(timer.display(), TimeDisplay::Idle);

        timer.start();
        clock.advance(Duration::from_secs(90));
        assert!(!timer.tick());
        assert_eq!(timer.display().to_string(), "01:30");
    }

    #[test]
    fn test_stop_freezes_value() {
        let (clock, mut timer) = timer();
        timer.start();
        clock.advance(Duration::from_secs(10));
        timer.stop();
        clock.advance(Duration::from_secs(10));

        assert_eq!(timer.display(), TimeDisplay::Stopped(Duration::from_secs(10)));
        assert_eq!(timer.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_hides_display() {
        let (clock, mut timer) = timer();
        timer.start();
        clock.advance(Duration::from_secs(3600));

        assert!(timer.tick());
        assert!(timer.is_hidden());
        assert_eq!(timer.display().to_string(), HIDDEN_TIME);

        // Later ticks change nothing.
        clock.advance(Duration::from_secs(5));
        assert!(!timer.tick());
        assert_eq!(timer.elapsed(), Duration::from_secs(3600));
    }

    #[test]
    fn test_stop_after_hide_keeps_sentinel() {
        let (_clock, mut timer) = timer();
        timer.start();
        timer.hide();
        timer.stop();
        assert_eq!(timer.display(), TimeDisplay::Hidden);
    }

    #[test]
    fn test_restart() {
        let (clock, mut timer) = timer();
        timer.start();
        clock.advance(Duration::from_secs(30));
        timer.hide();

        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }
}
