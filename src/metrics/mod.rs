mod types;

pub use types::{IngestMetrics, MetricsSnapshot};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::detection::SignalKind;

const MAX_RECENT_INGESTS: usize = 20;

/// Counts what flows through the engine: frames ingested, entries rejected
/// at validation, alerts fired per kind, and a rolling window of per-ingest
/// timings for the diagnostics view.
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    recent_ingests: Vec<IngestMetrics>,
    frame_count: u64,
    rejected_entry_count: u64,
    alert_count: u64,
    alerts_by_kind: HashMap<SignalKind, u64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsState {
                recent_ingests: Vec::with_capacity(MAX_RECENT_INGESTS),
                frame_count: 0,
                rejected_entry_count: 0,
                alert_count: 0,
                alerts_by_kind: HashMap::new(),
            })),
        }
    }

    pub async fn record_ingest(&self, metrics: IngestMetrics, alerted_kinds: &[SignalKind]) {
        let mut state = self.inner.lock().await;

        state.frame_count += 1;
        state.rejected_entry_count += metrics.rejected as u64;
        state.alert_count += metrics.alerts as u64;
        for kind in alerted_kinds {
            *state.alerts_by_kind.entry(*kind).or_insert(0) += 1;
        }

        state.recent_ingests.push(metrics);
        if state.recent_ingests.len() > MAX_RECENT_INGESTS {
            state.recent_ingests.remove(0);
        }
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let state = self.inner.lock().await;
        MetricsSnapshot {
            recent_ingests: state.recent_ingests.clone(),
            frame_count: state.frame_count,
            rejected_entry_count: state.rejected_entry_count,
            alert_count: state.alert_count,
            alerts_by_kind: state.alerts_by_kind.clone(),
        }
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.recent_ingests.clear();
        state.frame_count = 0;
        state.rejected_entry_count = 0;
        state.alert_count = 0;
        state.alerts_by_kind.clear();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
