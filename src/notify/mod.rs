use log::{info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::audio::AlertSoundHandle;
use crate::detection::SignalKind;

/// Collaborator invoked when a signal's run length exceeds its threshold.
///
/// Implementations must return quickly; the engine calls this inline on the
/// sampling tick and a blocking notifier would stall the whole frame stream.
pub trait AlertNotifier: Send {
    fn notify_alert(&mut self, kind: SignalKind);
}

/// Swallows alerts. Useful for engines whose callers only poll state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl AlertNotifier for NullNotifier {
    fn notify_alert(&mut self, _kind: SignalKind) {}
}

/// Pushes alerts onto an unbounded channel so playback (or any other
/// reaction) happens off the sampling tick. Sending never blocks.
pub struct ChannelNotifier {
    tx: UnboundedSender<SignalKind>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<SignalKind>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertNotifier for ChannelNotifier {
    fn notify_alert(&mut self, kind: SignalKind) {
        if self.tx.send(kind).is_err() {
            warn!("alert receiver dropped; {} alert discarded", kind.as_str());
        }
    }
}

/// Drains alert events into the sound player. Spawn once per monitor; exits
/// when every `ChannelNotifier` clone of the sender is gone.
pub async fn alert_worker(mut rx: UnboundedReceiver<SignalKind>, sound: AlertSoundHandle) {
    while let Some(kind) = rx.recv().await {
        info!("alert: {} exceeded its threshold", kind.as_str());
        if let Err(err) = sound.play_chirp() {
            warn!("alert playback failed: {err}");
        }
    }
    info!("alert worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_forwards_kinds_in_order() {
        let (mut notifier, mut rx) = ChannelNotifier::new();
        notifier.notify_alert(SignalKind::PhoneVisible);
        notifier.notify_alert(SignalKind::PersonAbsence);

        assert_eq!(rx.try_recv().unwrap(), SignalKind::PhoneVisible);
        assert_eq!(rx.try_recv().unwrap(), SignalKind::PersonAbsence);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (mut notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify_alert(SignalKind::Drowsiness);
    }
}
