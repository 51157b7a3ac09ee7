//! Per-drill performance counters for the active run.
//!
//! All mutation is clamped rather than rejected, so `makes <= attempts`
//! holds at all times regardless of the order shots and manual corrections
//! arrive in.

use serde::{Deserialize, Serialize};

/// Which counter a manual adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    Makes,
    Attempts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillStat {
    pub makes: u32,
    pub attempts: u32,
    pub time_spent_secs: u64,
}

impl DrillStat {
    /// Record one shot attempt.
    pub fn record_shot(&mut self, made: bool) {
        self.attempts += 1;
        if made {
            self.makes += 1;
        }
    }

    /// Apply a +/-1 correction to the given field, clamped.
    pub fn adjust(&mut self, field: StatField, delta: i32) {
        match field {
            StatField::Makes => self.adjust_makes(delta),
            StatField::Attempts => self.adjust_attempts(delta),
        }
    }

    /// Makes are clamped to `[0, attempts]`.
    pub fn adjust_makes(&mut self, delta: i32) {
        let next = self.makes.saturating_add_signed(delta);
        self.makes = next.min(self.attempts);
    }

    /// Attempts are clamped to `>= 0`; makes follow down so they never
    /// exceed attempts.
    pub fn adjust_attempts(&mut self, delta: i32) {
        self.attempts = self.attempts.saturating_add_signed(delta);
        if self.makes > self.attempts {
            self.makes = self.attempts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn record_shot_counts_makes_and_attempts() {
        let mut stat = DrillStat::default();
        stat.record_shot(true);
        stat.record_shot(false);
        stat.record_shot(true);
        assert_eq!(stat.makes, 2);
        assert_eq!(stat.attempts, 3);
    }

    #[test]
    fn makes_clamp_to_attempts() {
        let mut stat = DrillStat {
            makes: 2,
            attempts: 2,
            time_spent_secs: 0,
        };
        stat.adjust(StatField::Makes, 1);
        assert_eq!(stat.makes, 2);
        stat.adjust(StatField::Makes, -1);
        assert_eq!(stat.makes, 1);
    }

    #[test]
    fn makes_never_go_below_zero() {
        let mut stat = DrillStat::default();
        stat.adjust(StatField::Makes, -1);
        assert_eq!(stat.makes, 0);
        stat.adjust(StatField::Attempts, -1);
        assert_eq!(stat.attempts, 0);
    }

    #[test]
    fn shrinking_attempts_pulls_makes_down() {
        // attempts 5 -> 1 drags makes 3 -> 1, never below zero.
        let mut stat = DrillStat {
            makes: 3,
            attempts: 5,
            time_spent_secs: 0,
        };
        for _ in 0..4 {
            stat.adjust(StatField::Attempts, -1);
        }
        assert_eq!(stat.attempts, 1);
        assert_eq!(stat.makes, 1);
    }

    #[test]
    fn adjustments_never_touch_time_spent() {
        let mut stat = DrillStat {
            makes: 1,
            attempts: 2,
            time_spent_secs: 42,
        };
        stat.adjust(StatField::Makes, 1);
        stat.adjust(StatField::Attempts, -1);
        assert_eq!(stat.time_spent_secs, 42);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Shot(bool),
        Adjust(StatField, i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Shot),
            (any::<bool>(), any::<bool>()).prop_map(|(f, up)| Op::Adjust(
                if f { StatField::Makes } else { StatField::Attempts },
                if up { 1 } else { -1 },
            )),
        ]
    }

    proptest! {
        #[test]
        fn invariant_holds_under_any_op_order(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut stat = DrillStat::default();
            for op in ops {
                match op {
                    Op::Shot(made) => stat.record_shot(made),
                    Op::Adjust(field, delta) => stat.adjust(field, delta),
                }
                prop_assert!(stat.makes <= stat.attempts);
            }
        }
    }
}
