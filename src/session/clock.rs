use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Running,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

/// Stopwatch state for one session, advanced by the external 1 Hz elapsed
/// tick. Independent of the sampling tick that drives detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClock {
    pub status: SessionStatus,
    pub elapsed_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            status: SessionStatus::Idle,
            elapsed_ms: 0,
            started_at: None,
        }
    }
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Starts (or restarts) the clock from zero. Restarting while running
    /// discards the in-flight elapsed time; it is the caller's job to have
    /// stopped the old tick source first so time is never double-counted.
    pub fn start(&mut self, now: DateTime<Utc>) {
        *self = Self {
            status: SessionStatus::Running,
            elapsed_ms: 0,
            started_at: Some(now),
        };
    }

    /// Advances by one elapsed-time tick. No-op while idle.
    pub fn advance(&mut self, delta: Duration) {
        if self.is_running() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(delta.as_millis() as u64);
        }
    }

    /// Stops the clock, returning the elapsed time it had accumulated.
    pub fn stop(&mut self) -> Duration {
        let elapsed = self.elapsed();
        *self = Self::default();
        elapsed
    }

    /// `MM:SS:mmm`, the stopwatch label format. `00:00:000` while idle.
    pub fn display(&self) -> String {
        let minutes = self.elapsed_ms / 60_000;
        let seconds = (self.elapsed_ms / 1_000) % 60;
        let millis = self.elapsed_ms % 1_000;
        format!("{minutes:02}:{seconds:02}:{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_only_counts_while_running() {
        let mut clock = SessionClock::new();
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.elapsed_ms, 0);

        clock.start(Utc::now());
        clock.advance(Duration::from_secs(1));
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.elapsed_ms, 2_000);
    }

    #[test]
    fn stop_returns_elapsed_and_zeroes() {
        let mut clock = SessionClock::new();
        clock.start(Utc::now());
        clock.advance(Duration::from_millis(1_500));
        assert_eq!(clock.stop(), Duration::from_millis(1_500));
        assert_eq!(clock.status, SessionStatus::Idle);
        assert_eq!(clock.elapsed_ms, 0);
    }

    #[test]
    fn restart_discards_previous_elapsed() {
        let mut clock = SessionClock::new();
        clock.start(Utc::now());
        clock.advance(Duration::from_secs(42));
        clock.start(Utc::now());
        assert_eq!(clock.elapsed_ms, 0);
        assert!(clock.is_running());
    }

    #[test]
    fn display_formats_minutes_seconds_millis() {
        let mut clock = SessionClock::new();
        assert_eq!(clock.display(), "00:00:000");

        clock.start(Utc::now());
        clock.advance(Duration::from_millis(83_042));
        assert_eq!(clock.display(), "01:23:042");
    }
}
