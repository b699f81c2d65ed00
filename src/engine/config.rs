use crate::detection::SignalKind;

/// Per-kind tuning: how many consecutive violating ticks arm an alert, and
/// the minimum detector confidence before an observation counts at all.
#[derive(Debug, Clone, Copy)]
pub struct SignalConfig {
    /// Alert fires once the run length strictly exceeds this.
    pub alert_threshold: u32,
    /// Observations below this confidence are treated as "nothing seen".
    pub min_confidence: f32,
    /// Initial toggle state for this kind.
    pub enabled: bool,
}

/// Configuration for the monitoring engine with tunable thresholds.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub person: SignalConfig,
    pub phone: SignalConfig,
    pub drowsiness: SignalConfig,

    /// Score deducted per violating enabled kind per sampling tick.
    pub score_penalty: i64,
    /// Score recovered per active-session sampling tick while below ceiling.
    pub score_recovery: i64,
    /// Score start value and upper bound. There is no lower bound.
    pub score_ceiling: i64,
}

impl MonitorConfig {
    pub fn signal(&self, kind: SignalKind) -> &SignalConfig {
        match kind {
            SignalKind::PersonAbsence => &self.person,
            SignalKind::PhoneVisible => &self.phone,
            SignalKind::Drowsiness => &self.drowsiness,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            person: SignalConfig {
                alert_threshold: 5,
                min_confidence: 0.1,
                enabled: true,
            },
            phone: SignalConfig {
                alert_threshold: 5,
                min_confidence: 0.1,
                enabled: true,
            },
            // Drowsiness needs a longer run and a stronger detection before
            // alerting; blinks are not drowsiness.
            drowsiness: SignalConfig {
                alert_threshold: 15,
                min_confidence: 0.25,
                enabled: true,
            },
            score_penalty: 5,
            score_recovery: 1,
            score_ceiling: 100,
        }
    }
}
