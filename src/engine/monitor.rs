use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use crate::detection::{BoundingBox, DetectionFrame, FrameError, SignalKind};
use crate::notify::{AlertNotifier, NullNotifier};
use crate::session::{SessionClock, SessionRecorder, SessionStatus, StopwatchEntry};

use super::{AlertController, MonitorConfig, ProductivityScore, RunLengthTracker};

/// One tracked signal: its run counter plus the alert gate in front of it.
#[derive(Debug)]
struct SignalChannel {
    tracker: RunLengthTracker,
    alert: AlertController,
}

/// A detection the presentation layer may draw this tick, surfaced only for
/// kinds whose toggle is on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOverlay {
    pub kind: SignalKind,
    pub bbox: BoundingBox,
    pub confidence: f32,
}

/// What one sampling tick produced, for callers that react per frame rather
/// than polling snapshots.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Kinds whose alert fired this tick (at most once each).
    pub alerts: Vec<SignalKind>,
    /// Enabled kinds whose violation condition held this tick.
    pub violations: Vec<SignalKind>,
    /// Runs that ended naturally this tick, in `(kind, length)` form.
    pub completed_runs: Vec<(SignalKind, u32)>,
    /// Frame entries rejected at the validation boundary. The rest of the
    /// frame still applied.
    pub rejected: Vec<FrameError>,
    pub overlays: Vec<FrameOverlay>,
    /// Updated score, present only when a session was running.
    pub score: Option<i64>,
}

/// Point-in-time view of everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub status: SessionStatus,
    pub session_id: Option<String>,
    pub elapsed_ms: u64,
    pub elapsed_display: String,
    pub score: i64,
    pub score_series: Vec<i64>,
    pub current_runs: HashMap<SignalKind, u32>,
    pub stopwatch_entries: Vec<StopwatchEntry>,
    pub signal_histories: HashMap<SignalKind, Vec<u32>>,
}

/// The focus monitoring engine.
///
/// Purely reactive: two external tick sources drive it, the sampling tick
/// (`ingest_detection_frame`) and the 1 Hz elapsed tick (`advance_elapsed`).
/// The caller serializes those calls; the engine holds no locks and spawns
/// no tasks. Collaborators arrive by injection, never through globals.
pub struct FocusEngine {
    config: MonitorConfig,
    channels: HashMap<SignalKind, SignalChannel>,
    score: ProductivityScore,
    score_series: Vec<i64>,
    recorder: SessionRecorder,
    clock: SessionClock,
    session_id: Option<String>,
    notifier: Box<dyn AlertNotifier>,
}

impl FocusEngine {
    pub fn new(config: MonitorConfig, notifier: Box<dyn AlertNotifier>) -> Self {
        let mut channels = HashMap::new();
        for kind in SignalKind::ALL {
            let signal = config.signal(kind);
            channels.insert(
                kind,
                SignalChannel {
                    tracker: RunLengthTracker::new(),
                    alert: AlertController::new(signal.alert_threshold, signal.enabled),
                },
            );
        }

        Self {
            score: ProductivityScore::new(
                config.score_penalty,
                config.score_recovery,
                config.score_ceiling,
            ),
            config,
            channels,
            score_series: Vec::new(),
            recorder: SessionRecorder::new(),
            clock: SessionClock::new(),
            session_id: None,
            notifier,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(MonitorConfig::default(), Box::new(NullNotifier))
    }

    /// Consumes one detection frame; called once per sampling tick.
    ///
    /// Per enabled kind present in the frame: advance the run tracker, record
    /// any naturally completed run, then evaluate the alert gate. A firing
    /// gate notifies the collaborator and interrupts the run without
    /// recording it. Finally, while a session is running, the productivity
    /// score takes one tick with every violation that held.
    pub fn ingest_detection_frame(&mut self, frame: DetectionFrame) -> IngestReport {
        let mut report = IngestReport::default();

        for kind in SignalKind::ALL {
            let Some(observation) = frame.get(kind) else {
                continue;
            };

            if let Err(err) = observation.validate(kind) {
                debug!("rejected {} entry: {err}", kind.as_str());
                report.rejected.push(err);
                continue;
            }

            let channel = match self.channels.get_mut(&kind) {
                Some(channel) => channel,
                None => continue,
            };

            // A disabled kind is frozen: the tracker neither advances nor
            // resets, and nothing downstream sees the observation.
            if !channel.alert.enabled {
                continue;
            }

            let accepted = observation.confidence >= self.config.signal(kind).min_confidence;
            let detected = accepted && observation.active;

            if detected {
                if let Some(bbox) = observation.bbox {
                    report.overlays.push(FrameOverlay {
                        kind,
                        bbox,
                        confidence: observation.confidence,
                    });
                }
            }

            let condition = kind.is_violation(detected);
            if condition {
                report.violations.push(kind);
            }

            if let Some(completed) = channel.tracker.observe(condition) {
                self.recorder.on_run_completed(kind, completed);
                report.completed_runs.push((kind, completed));
            }

            if channel.alert.evaluate(channel.tracker.current_run()) {
                let run = channel.tracker.interrupt();
                info!("{} alert after {run} consecutive ticks", kind.as_str());
                self.notifier.notify_alert(kind);
                report.alerts.push(kind);
            }
        }

        if self.clock.is_running() {
            let value = self.score.apply_tick(report.violations.len());
            self.score_series.push(value);
            report.score = Some(value);
        }

        report
    }

    /// Advances the stopwatch; called once per elapsed-time tick while a
    /// session is running. No-op when idle.
    pub fn advance_elapsed(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Begins a session, arming alerts. Starting while already running is
    /// the restart path: elapsed time returns to zero and no stopwatch entry
    /// is recorded for the abandoned window.
    pub fn start_session(&mut self) -> &str {
        // A fresh chart for each session after the first.
        if !self.score_series.is_empty() {
            self.score.reset();
            self.score_series.clear();
        }

        let session_id = Uuid::new_v4().to_string();
        info!("session {session_id} started");
        self.session_id = Some(session_id);
        self.clock.start(Utc::now());
        for channel in self.channels.values_mut() {
            channel.alert.armed = true;
        }

        self.session_id.as_deref().unwrap_or_default()
    }

    /// Ends the running session: records the stopwatch interval, zeroes the
    /// clock, and disarms alerts. Score and histories are left as they are
    /// until the next start. Calling while idle is a no-op.
    pub fn stop_session(&mut self) -> Option<StopwatchEntry> {
        if !self.clock.is_running() {
            return None;
        }

        let elapsed = self.clock.stop();
        let session_id = self.session_id.take().unwrap_or_default();
        for channel in self.channels.values_mut() {
            channel.alert.armed = false;
        }

        let entry = self
            .recorder
            .on_session_stop(session_id, Utc::now(), elapsed);
        info!(
            "session {} stopped at {:02}:{:02}:{:03}",
            entry.session_id, entry.minutes, entry.seconds, entry.milliseconds
        );
        Some(entry)
    }

    /// Applies every persisted toggle at once, e.g. on startup.
    pub fn apply_toggles(&mut self, toggles: &crate::settings::SignalToggles) {
        for kind in SignalKind::ALL {
            self.set_signal_enabled(kind, toggles.for_kind(kind));
        }
    }

    /// Mirrors a presentation-layer toggle; takes effect on the next tick.
    pub fn set_signal_enabled(&mut self, kind: SignalKind, enabled: bool) {
        if let Some(channel) = self.channels.get_mut(&kind) {
            channel.alert.enabled = enabled;
        }
    }

    pub fn signal_enabled(&self, kind: SignalKind) -> bool {
        self.channels
            .get(&kind)
            .map(|channel| channel.alert.enabled)
            .unwrap_or(false)
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn current_score(&self) -> i64 {
        self.score.value()
    }

    pub fn score_series(&self) -> &[i64] {
        &self.score_series
    }

    pub fn current_elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn elapsed_display(&self) -> String {
        self.clock.display()
    }

    pub fn current_run(&self, kind: SignalKind) -> u32 {
        self.channels
            .get(&kind)
            .map(|channel| channel.tracker.current_run())
            .unwrap_or(0)
    }

    pub fn stopwatch_history(&self) -> &[StopwatchEntry] {
        self.recorder.stopwatch_history()
    }

    pub fn signal_history(&self, kind: SignalKind) -> &[u32] {
        self.recorder.signal_history(kind)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut current_runs = HashMap::new();
        for kind in SignalKind::ALL {
            current_runs.insert(kind, self.current_run(kind));
        }

        EngineSnapshot {
            status: self.clock.status,
            session_id: self.session_id.clone(),
            elapsed_ms: self.clock.elapsed_ms,
            elapsed_display: self.clock.display(),
            score: self.score.value(),
            score_series: self.score_series.clone(),
            current_runs,
            stopwatch_entries: self.recorder.stopwatch_history().to_vec(),
            signal_histories: self.recorder.signal_histories(),
        }
    }
}
