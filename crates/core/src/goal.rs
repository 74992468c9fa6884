use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A savings goal with a target and a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub target_amount: Money,
    pub saved_amount: Money,
    pub deadline: NaiveDate,
}

impl Goal {
    /// Amount still to be saved, floored at zero.
    pub fn remaining(&self) -> Money {
        self.target_amount.saturating_sub(self.saved_amount)
    }

    pub fn is_achieved(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Fraction saved so far (0.0–1.0 for goals in progress).
    pub fn progress(&self) -> f64 {
        self.saved_amount.ratio_of(self.target_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, saved: i64) -> Goal {
        Goal {
            id: None,
            name: "Emergency fund".to_string(),
            category: "emergency".to_string(),
            target_amount: Money::new(target),
            saved_amount: Money::new(saved),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[test]
    fn remaining_and_progress() {
        let g = goal(100_000, 25_000);
        assert_eq!(g.remaining(), Money::new(75_000));
        assert_eq!(g.progress(), 0.25);
        assert!(!g.is_achieved());
    }

    #[test]
    fn achieved_goal_has_zero_remaining() {
        let g = goal(100_000, 120_000);
        assert_eq!(g.remaining(), Money::zero());
        assert!(g.is_achieved());
    }
}
