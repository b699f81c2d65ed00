pub mod clock;
pub mod recorder;

pub use clock::{SessionClock, SessionStatus};
pub use recorder::{SessionRecorder, StopwatchEntry};
