/// Counts consecutive sampling ticks a violation condition has held.
///
/// A run ends the tick the condition turns false; the completed length is
/// handed back exactly once so the caller can record it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthTracker {
    current_run: u32,
}

impl RunLengthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_run(&self) -> u32 {
        self.current_run
    }

    /// Advances one tick. Returns `Some(len)` when a nonzero run just ended.
    pub fn observe(&mut self, condition: bool) -> Option<u32> {
        if condition {
            self.current_run += 1;
            return None;
        }

        if self.current_run > 0 {
            let completed = self.current_run;
            self.current_run = 0;
            return Some(completed);
        }

        None
    }

    /// Clears the run without reporting it as completed. Used after an alert
    /// fires mid-run; interrupted runs are not recorded as completions.
    pub fn interrupt(&mut self) -> u32 {
        std::mem::take(&mut self.current_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_completes_with_exact_length() {
        let mut tracker = RunLengthTracker::new();
        for _ in 0..4 {
            assert_eq!(tracker.observe(true), None);
        }
        assert_eq!(tracker.current_run(), 4);
        assert_eq!(tracker.observe(false), Some(4));
        assert_eq!(tracker.current_run(), 0);
    }

    #[test]
    fn false_observation_with_no_run_is_a_noop() {
        let mut tracker = RunLengthTracker::new();
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.current_run(), 0);
    }

    #[test]
    fn completed_run_is_reported_once() {
        let mut tracker = RunLengthTracker::new();
        tracker.observe(true);
        assert_eq!(tracker.observe(false), Some(1));
        assert_eq!(tracker.observe(false), None);
    }

    #[test]
    fn interrupt_discards_run() {
        let mut tracker = RunLengthTracker::new();
        for _ in 0..6 {
            tracker.observe(true);
        }
        assert_eq!(tracker.interrupt(), 6);
        assert_eq!(tracker.current_run(), 0);
        // The interrupted run never shows up as a completion afterwards.
        assert_eq!(tracker.observe(false), None);
    }

    #[test]
    fn runs_reaccumulate_after_reset() {
        let mut tracker = RunLengthTracker::new();
        tracker.observe(true);
        tracker.observe(true);
        tracker.observe(false);
        tracker.observe(true);
        assert_eq!(tracker.current_run(), 1);
    }
}
