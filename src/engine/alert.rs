/// Threshold gate in front of one signal's run-length tracker.
///
/// `evaluate` is an edge trigger: when it fires, the caller must interrupt
/// the tracker so the same sustained violation cannot re-fire every tick. It
/// has to exceed the threshold again from zero.
#[derive(Debug, Clone, Copy)]
pub struct AlertController {
    /// Run length must strictly exceed this to fire.
    pub threshold: u32,
    /// Mirrors the presentation layer's per-kind toggle. While disabled the
    /// kind's tracker is frozen: no advance, no reset, no firing.
    pub enabled: bool,
    /// True only while a session is running. Alerts never fire when idle.
    pub armed: bool,
}

impl AlertController {
    pub fn new(threshold: u32, enabled: bool) -> Self {
        Self {
            threshold,
            enabled,
            armed: false,
        }
    }

    /// Decides whether an alert fires for the run length produced by this
    /// tick's `observe`.
    pub fn evaluate(&self, run_after_observe: u32) -> bool {
        self.enabled && self.armed && run_after_observe > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_strictly_above_threshold() {
        let mut alert = AlertController::new(5, true);
        alert.armed = true;
        assert!(!alert.evaluate(4));
        assert!(!alert.evaluate(5));
        assert!(alert.evaluate(6));
    }

    #[test]
    fn never_fires_while_unarmed() {
        let alert = AlertController::new(5, true);
        assert!(!alert.evaluate(100));
    }

    #[test]
    fn never_fires_while_disabled() {
        let mut alert = AlertController::new(5, false);
        alert.armed = true;
        assert!(!alert.evaluate(100));
    }
}
