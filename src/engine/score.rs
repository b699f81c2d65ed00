/// Bounded productivity accumulator.
///
/// Starts at the ceiling (100). Every active-session sampling tick it loses
/// `penalty` per violating enabled kind and, in the same tick, recovers
/// `recovery` when still below the ceiling after the deductions. Deductions
/// and recovery are not exclusive branches: two simultaneous violations from
/// a full score land on `100 - 5 - 5 + 1 = 91`.
///
/// There is deliberately no floor; sustained violations drive the value
/// negative and that is a defined outcome, not an error.
#[derive(Debug, Clone, Copy)]
pub struct ProductivityScore {
    value: i64,
    penalty: i64,
    recovery: i64,
    ceiling: i64,
}

impl ProductivityScore {
    pub fn new(penalty: i64, recovery: i64, ceiling: i64) -> Self {
        Self {
            value: ceiling,
            penalty,
            recovery,
            ceiling,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Applies one sampling tick: deductions for each violating kind, then
    /// recovery if the value sits below the ceiling. Returns the new value.
    ///
    /// Recovery never lifts the value above the ceiling, and values already
    /// at or above it do not recover.
    pub fn apply_tick(&mut self, violation_count: usize) -> i64 {
        self.value -= self.penalty * violation_count as i64;
        if self.value < self.ceiling {
            self.value += self.recovery;
        }
        self.value
    }

    /// Back to the ceiling. Called when a new session begins after a stop.
    pub fn reset(&mut self) -> i64 {
        self.value = self.ceiling;
        self.value
    }
}

impl Default for ProductivityScore {
    fn default() -> Self {
        Self::new(5, 1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tick_recovers_one_point() {
        let mut score = ProductivityScore::default();
        score.apply_tick(1); // 100 - 5 + 1 = 96
        assert_eq!(score.value(), 96);
        assert_eq!(score.apply_tick(0), 97);
    }

    #[test]
    fn recovery_does_not_exceed_ceiling() {
        let mut score = ProductivityScore::default();
        assert_eq!(score.apply_tick(0), 100);
        assert_eq!(score.apply_tick(0), 100);
    }

    #[test]
    fn value_above_ceiling_does_not_recover() {
        let mut score = ProductivityScore::default();
        score.value = 103;
        assert_eq!(score.apply_tick(0), 103);
    }

    #[test]
    fn simultaneous_violations_stack_with_recovery() {
        let mut score = ProductivityScore::default();
        assert_eq!(score.apply_tick(2), 91);
    }

    #[test]
    fn no_floor_allows_negative_values() {
        let mut score = ProductivityScore::default();
        for _ in 0..30 {
            score.apply_tick(3);
        }
        // 30 ticks of (-15 + 1) from 100
        assert_eq!(score.value(), 100 - 30 * 14);
        assert!(score.value() < 0);
    }

    #[test]
    fn reset_returns_to_ceiling() {
        let mut score = ProductivityScore::default();
        score.apply_tick(3);
        assert_eq!(score.reset(), 100);
        assert_eq!(score.value(), 100);
    }
}
