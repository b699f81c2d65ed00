//! Feeds a scripted detection stream through the monitor, standing in for
//! the webcam perception source. Useful for eyeballing alert timing and the
//! score curve without a camera:
//!
//! ```sh
//! RUST_LOG=info cargo run --bin simulate
//! ```

use std::time::Duration;

use anyhow::Result;
use log::info;

use focusguardian::{
    DetectionFrame, MonitorConfig, MonitorController, SignalKind, SignalObservation,
};

const FRAME_INTERVAL_MS: u64 = 42;

/// Scripted tick: person leaves for a stretch, then comes back and picks up
/// their phone for a longer one.
fn scripted_frame(tick: u32) -> DetectionFrame {
    let person_seen = !(30..=40).contains(&tick);
    let phone_seen = (60..=75).contains(&tick);

    DetectionFrame::now()
        .with(
            SignalKind::PersonAbsence,
            SignalObservation::new(person_seen, 0.92),
        )
        .with(
            SignalKind::PhoneVisible,
            SignalObservation::new(phone_seen, if phone_seen { 0.71 } else { 0.0 }),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let controller = MonitorController::with_audio_alerts(MonitorConfig::default());
    controller.start_session().await?;

    for tick in 0..120 {
        let report = controller.ingest_frame(scripted_frame(tick)).await;
        for kind in &report.alerts {
            info!("tick {tick}: {} alert fired", kind.as_str());
        }
        tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
    }

    let entry = controller.stop_session().await;
    let snapshot = controller.snapshot().await;
    let metrics = controller.metrics_snapshot().await;

    info!(
        "session over: stopwatch={:?} score={} history(person)={:?} history(phone)={:?}",
        entry.map(|e| format!("{:02}:{:02}:{:03}", e.minutes, e.seconds, e.milliseconds)),
        snapshot.score,
        snapshot.signal_histories[&SignalKind::PersonAbsence],
        snapshot.signal_histories[&SignalKind::PhoneVisible],
    );
    info!(
        "{} frames ingested, {} alerts ({:?})",
        metrics.frame_count, metrics.alert_count, metrics.alerts_by_kind
    );

    Ok(())
}
