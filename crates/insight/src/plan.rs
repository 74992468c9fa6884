//! Static planning tables: target ranges per goal archetype and the
//! commitment-category split recommended during onboarding. All figures
//! are income multiples.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kosha_core::Money;

/// Savings-goal archetypes offered by the goal setup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Emergency,
    Education,
    Travel,
    Gadget,
    General,
    JustSave,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingRange {
    pub min: Money,
    pub typical: Money,
    pub max: Money,
    pub description: &'static str,
}

// Multipliers in tenths of monthly income: (min, typical, max, blurb).
const fn range_spec(goal_type: GoalType) -> (i64, i64, i64, &'static str) {
    match goal_type {
        GoalType::Emergency => {
            (30, 60, 120, "Emergency funds typically cover 3-12 months of expenses")
        }
        GoalType::Education => {
            (5, 20, 50, "Education costs vary based on course type and institution")
        }
        GoalType::Travel => (3, 10, 30, "Travel budgets depend on destination and duration"),
        GoalType::Gadget => (2, 5, 15, "Gadget prices range from budget to premium options"),
        GoalType::General => (10, 30, 60, "General savings for future needs and opportunities"),
        GoalType::JustSave => (0, 0, 0, "Maximize your savings potential"),
    }
}

/// Sensible target range for a goal archetype, scaled to income.
pub fn spending_range(goal_type: GoalType, monthly_income: Money) -> SpendingRange {
    let (min, typical, max, description) = range_spec(goal_type);
    let tenths = |t: i64| monthly_income.scale(Decimal::new(t, 1));
    SpendingRange {
        min: tenths(min),
        typical: tenths(typical),
        max: tenths(max),
        description,
    }
}

/// A commitment bucket with its recommended share of income. Buckets
/// marked `hidden` start collapsed in the editor and default to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitmentCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub amount: Money,
    pub recommended_min: Money,
    pub recommended_max: Money,
    pub hidden: bool,
}

// (id, name, default %, recommended min %, recommended max %, hidden)
const COMMITMENT_TABLE: &[(&str, &str, i64, i64, i64, bool)] = &[
    ("rent", "Rent & Housing", 25, 25, 30, false),
    ("food", "Food & Groceries", 15, 15, 20, false),
    ("travel", "Travel & Commute", 5, 5, 10, false),
    ("education", "Education", 0, 5, 10, true),
    ("emi", "Loan EMIs", 0, 10, 20, true),
    ("utilities", "Utilities", 5, 5, 8, false),
    ("subscriptions", "Subscriptions", 0, 2, 5, true),
    ("entertainment", "Entertainment", 5, 5, 10, false),
    ("healthcare", "Healthcare", 5, 5, 10, false),
    ("other", "Other", 0, 5, 10, true),
];

pub fn commitment_recommendations(monthly_income: Money) -> Vec<CommitmentCategory> {
    let pct = |p: i64| monthly_income.scale(Decimal::new(p, 2));
    COMMITMENT_TABLE
        .iter()
        .map(|&(id, name, amount, min, max, hidden)| CommitmentCategory {
            id,
            name,
            amount: pct(amount),
            recommended_min: pct(min),
            recommended_max: pct(max),
            hidden,
        })
        .collect()
}
