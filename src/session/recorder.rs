use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::SignalKind;

/// One finished stopwatch interval, broken into the units the timer label
/// shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchEntry {
    pub session_id: String,
    pub stopped_at: DateTime<Utc>,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl StopwatchEntry {
    pub fn from_elapsed(session_id: String, stopped_at: DateTime<Utc>, elapsed: Duration) -> Self {
        let total_ms = elapsed.as_millis() as u64;
        Self {
            session_id,
            stopped_at,
            minutes: total_ms / 60_000,
            seconds: (total_ms / 1_000) % 60,
            milliseconds: total_ms % 1_000,
        }
    }
}

/// Accumulates session analytics: stopwatch intervals and, per signal kind,
/// every naturally completed violation run.
///
/// Histories span the life of the engine instance, not a single session;
/// starting a new session does not clear them.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    stopwatch_entries: Vec<StopwatchEntry>,
    signal_histories: HashMap<SignalKind, Vec<u32>>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed run. Called for every `Some` out of a tracker's
    /// `observe`, whether or not the run ever reached alert threshold.
    pub fn on_run_completed(&mut self, kind: SignalKind, run_length: u32) {
        self.signal_histories.entry(kind).or_default().push(run_length);
    }

    /// Records the stopwatch interval of a session that just stopped.
    pub fn on_session_stop(
        &mut self,
        session_id: String,
        stopped_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> StopwatchEntry {
        let entry = StopwatchEntry::from_elapsed(session_id, stopped_at, elapsed);
        self.stopwatch_entries.push(entry.clone());
        entry
    }

    pub fn stopwatch_history(&self) -> &[StopwatchEntry] {
        &self.stopwatch_entries
    }

    pub fn signal_history(&self, kind: SignalKind) -> &[u32] {
        self.signal_histories
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn signal_histories(&self) -> HashMap<SignalKind, Vec<u32>> {
        let mut histories: HashMap<SignalKind, Vec<u32>> = HashMap::new();
        for kind in SignalKind::ALL {
            histories.insert(kind, self.signal_history(kind).to_vec());
        }
        histories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_runs_keep_order() {
        let mut recorder = SessionRecorder::new();
        recorder.on_run_completed(SignalKind::PersonAbsence, 3);
        recorder.on_run_completed(SignalKind::PhoneVisible, 12);
        recorder.on_run_completed(SignalKind::PersonAbsence, 7);

        assert_eq!(recorder.signal_history(SignalKind::PersonAbsence), &[3, 7]);
        assert_eq!(recorder.signal_history(SignalKind::PhoneVisible), &[12]);
        assert!(recorder.signal_history(SignalKind::Drowsiness).is_empty());
    }

    #[test]
    fn stopwatch_entry_splits_units() {
        let mut recorder = SessionRecorder::new();
        let entry = recorder.on_session_stop(
            "abc".into(),
            Utc::now(),
            Duration::from_millis(2 * 60_000 + 31_000 + 250),
        );

        assert_eq!(entry.minutes, 2);
        assert_eq!(entry.seconds, 31);
        assert_eq!(entry.milliseconds, 250);
        assert_eq!(recorder.stopwatch_history().len(), 1);
    }

    #[test]
    fn histories_default_empty() {
        let recorder = SessionRecorder::new();
        assert!(recorder.stopwatch_history().is_empty());
        assert!(recorder.signal_history(SignalKind::PhoneVisible).is_empty());
    }
}
