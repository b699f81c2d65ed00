//! Focus monitoring engine.
//!
//! Consumes a stream of per-frame presence/absence signals (person present,
//! phone visible, drowsiness) and turns them into run-length tracked
//! violations, threshold-triggered alerts, a bounded productivity score, and
//! session analytics. Detection, rendering, and persistence live elsewhere;
//! this crate is the state machine between them.

pub mod audio;
pub mod detection;
pub mod engine;
pub mod metrics;
pub mod notify;
pub mod runtime;
pub mod session;
pub mod settings;

pub use detection::{BoundingBox, DetectionFrame, FrameError, SignalKind, SignalObservation};
pub use engine::{
    AlertController, EngineSnapshot, FocusEngine, FrameOverlay, IngestReport, MonitorConfig,
    ProductivityScore, RunLengthTracker, SignalConfig,
};
pub use notify::{AlertNotifier, ChannelNotifier, NullNotifier};
pub use runtime::MonitorController;
pub use session::{SessionClock, SessionRecorder, SessionStatus, StopwatchEntry};
pub use settings::{SettingsStore, SignalToggles};
