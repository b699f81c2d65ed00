use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use log::info;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::audio::AlertSoundHandle;
use crate::detection::{DetectionFrame, SignalKind};
use crate::engine::{EngineSnapshot, FocusEngine, IngestReport, MonitorConfig};
use crate::metrics::{IngestMetrics, MetricsCollector, MetricsSnapshot};
use crate::notify::{self, ChannelNotifier};
use crate::session::StopwatchEntry;

struct TickerHandle {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Async shell around the engine.
///
/// Owns the engine behind one mutex (the engine itself is single-threaded),
/// drives the 1 Hz elapsed tick from a tokio interval, and forwards sampling
/// ticks from whatever perception source the caller runs. Starting a session
/// while one is running replaces the ticker before arming the new session,
/// so elapsed time is never double-counted.
pub struct MonitorController {
    engine: Arc<Mutex<FocusEngine>>,
    ticker: Mutex<Option<TickerHandle>>,
    tick_interval: Duration,
    metrics: MetricsCollector,
}

impl MonitorController {
    pub fn new(engine: FocusEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Mutex::new(None),
            tick_interval: Duration::from_secs(1),
            metrics: MetricsCollector::new(),
        }
    }

    /// Engine wired to the default audio notifier: alerts land on a channel,
    /// a worker task drains it into the chirp player. The sampling tick is
    /// never blocked by playback. Must be called from within a runtime.
    pub fn with_audio_alerts(config: MonitorConfig) -> Self {
        let (notifier, rx) = ChannelNotifier::new();
        let sound = AlertSoundHandle::new();
        tokio::spawn(notify::alert_worker(rx, sound));
        Self::new(FocusEngine::new(config, Box::new(notifier)))
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub async fn start_session(&self) -> Result<EngineSnapshot> {
        // Restart semantics: the old tick source dies first.
        self.cancel_ticker().await;

        let snapshot = {
            let mut engine = self.engine.lock().await;
            engine.start_session();
            engine.snapshot()
        };

        self.spawn_ticker().await;
        Ok(snapshot)
    }

    /// Stops the running session. Returns the recorded stopwatch entry, or
    /// `None` when no session was active (duplicate stops are absorbed).
    pub async fn stop_session(&self) -> Option<StopwatchEntry> {
        self.cancel_ticker().await;
        self.engine.lock().await.stop_session()
    }

    /// Forwards one detection frame from the perception source.
    pub async fn ingest_frame(&self, frame: DetectionFrame) -> IngestReport {
        let started = Instant::now();
        let entries = frame.observations.len();
        let report = self.engine.lock().await.ingest_detection_frame(frame);

        self.metrics
            .record_ingest(
                IngestMetrics {
                    timestamp: Utc::now(),
                    entries,
                    rejected: report.rejected.len(),
                    violations: report.violations.len(),
                    alerts: report.alerts.len(),
                    total_us: started.elapsed().as_micros() as u64,
                },
                &report.alerts,
            )
            .await;

        report
    }

    pub async fn set_signal_enabled(&self, kind: SignalKind, enabled: bool) {
        self.engine.lock().await.set_signal_enabled(kind, enabled);
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        self.engine.lock().await.snapshot()
    }

    pub async fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_snapshot().await
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(old) = ticker_guard.take() {
            old.cancel.cancel();
            old.handle.abort();
        }

        let engine = Arc::clone(&self.engine);
        let tick_interval = self.tick_interval;
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the clock
            // only moves after a full period.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        engine.lock().await.advance_elapsed(tick_interval);
                    }
                    _ = token.cancelled() => {
                        info!("elapsed ticker shutting down");
                        break;
                    }
                }
            }
        });

        *ticker_guard = Some(TickerHandle { handle, cancel });
    }

    async fn cancel_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.cancel.cancel();
            let _ = ticker.handle.await;
        }
    }
}
