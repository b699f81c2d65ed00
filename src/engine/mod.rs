pub mod alert;
pub mod config;
pub mod monitor;
pub mod score;
pub mod tracker;

pub use alert::AlertController;
pub use config::{MonitorConfig, SignalConfig};
pub use monitor::{EngineSnapshot, FocusEngine, FrameOverlay, IngestReport};
pub use score::ProductivityScore;
pub use tracker::RunLengthTracker;
