use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::SignalKind;

/// Timing and outcome of one `ingest_detection_frame` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestMetrics {
    pub timestamp: DateTime<Utc>,
    pub entries: usize,
    pub rejected: usize,
    pub violations: usize,
    pub alerts: usize,
    pub total_us: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub recent_ingests: Vec<IngestMetrics>,
    pub frame_count: u64,
    pub rejected_entry_count: u64,
    pub alert_count: u64,
    pub alerts_by_kind: HashMap<SignalKind, u64>,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            recent_ingests: Vec::new(),
            frame_count: 0,
            rejected_entry_count: 0,
            alert_count: 0,
            alerts_by_kind: HashMap::new(),
        }
    }
}
