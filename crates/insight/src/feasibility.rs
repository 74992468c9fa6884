use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use kosha_core::{Expense, ExpenseKind, Goal, Money, MonthWindow};

use crate::capacity::SavingsCapacity;
use crate::util::months_until;

// ── Required-contribution arithmetic ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSavingsPlan {
    pub monthly_required: Money,
    pub is_feasible: bool,
    /// How far the requirement overshoots capacity; zero when feasible.
    pub shortfall: Money,
    /// The given timeline when feasible, otherwise the months the target
    /// actually needs at the available capacity.
    pub suggested_timeline_months: u32,
}

pub fn goal_savings(
    target_amount: Money,
    timeline_months: u32,
    remaining_capacity: Money,
) -> GoalSavingsPlan {
    let months = timeline_months.max(1);
    let monthly_required =
        Money::from_decimal(target_amount.amount() / Decimal::from(months));
    let is_feasible = monthly_required <= remaining_capacity;

    let suggested_timeline_months = if is_feasible {
        timeline_months
    } else if remaining_capacity.is_zero() {
        u32::MAX
    } else {
        (target_amount.amount() / remaining_capacity.amount())
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX)
    };

    GoalSavingsPlan {
        monthly_required,
        is_feasible,
        shortfall: monthly_required.saturating_sub(remaining_capacity),
        suggested_timeline_months,
    }
}

// ── Feasibility projection ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feasibility {
    /// Rough odds of hitting the deadline, in percent.
    pub probability: u8,
    pub projected_date: NaiveDate,
    pub message: &'static str,
}

/// Project when a goal completes at the given contribution rate and band
/// the odds of making the deadline.
pub fn goal_feasibility(goal: &Goal, monthly_contribution: Money, today: NaiveDate) -> Feasibility {
    let remaining = goal.remaining();
    if remaining.is_zero() {
        return Feasibility {
            probability: 100,
            projected_date: today,
            message: "Goal already achieved!",
        };
    }
    if monthly_contribution <= Money::zero() {
        let far_future = NaiveDate::from_ymd_opt(goal.deadline.year() + 10, 1, 1)
            .unwrap_or(goal.deadline);
        return Feasibility {
            probability: 0,
            projected_date: far_future,
            message: "Increase savings to reach this goal.",
        };
    }

    let months_needed = remaining.ratio_of(monthly_contribution);
    let projected_date = today
        .checked_add_months(Months::new(months_needed.ceil() as u32))
        .unwrap_or(goal.deadline);

    let until_deadline = months_until(today, goal.deadline);
    let probability = if months_needed <= until_deadline {
        95
    } else if months_needed <= until_deadline * 1.2 {
        70
    } else if months_needed <= until_deadline * 1.5 {
        40
    } else {
        10
    };

    let message = if probability >= 90 {
        "You're on track to reach this goal comfortably!"
    } else if probability >= 60 {
        "You can make it, but try to increase savings slightly."
    } else if probability >= 30 {
        "It's tight. Consider extending the deadline or saving more."
    } else {
        "This goal is at risk. You need a significant change in strategy."
    };

    Feasibility { probability, projected_date, message }
}

// ── Goal suggestions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Success,
    Timeline,
    Warning,
    Expense,
    Savings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub action: Option<String>,
}

/// Advice for one goal against the user's capacity and this month's
/// spending, in the order the goal screen presents it.
pub fn goal_suggestions(
    goal: &Goal,
    capacity: &SavingsCapacity,
    expenses: &[Expense],
    today: NaiveDate,
) -> Vec<GoalSuggestion> {
    let mut suggestions = Vec::new();

    let months_remaining = months_until(today, goal.deadline).max(1.0);
    let months_dec = Decimal::from_f64(months_remaining).unwrap_or(Decimal::ONE);
    let amount_needed = goal.remaining();
    let monthly_requirement = Money::from_decimal(amount_needed.amount() / months_dec);

    // Timeline feasibility.
    if monthly_requirement <= capacity.suggested_savings_min {
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Success,
            message: format!(
                "Easily achievable! You need {monthly_requirement}/month, well within your capacity."
            ),
            action: None,
        });
    } else if monthly_requirement <= capacity.suggested_savings_max {
        let share = monthly_requirement.ratio_of(capacity.remaining_income) * 100.0;
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Timeline,
            message: format!(
                "Achievable with discipline. Requires {monthly_requirement}/month ({share:.0}% of remaining income)."
            ),
            action: None,
        });
    } else if monthly_requirement <= capacity.remaining_income {
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Warning,
            message: format!(
                "Tight timeline. Requires {monthly_requirement}/month. Consider extending the deadline or reducing non-essential expenses."
            ),
            action: Some("Extend deadline by 6 months".to_string()),
        });
    } else {
        let action = if capacity.suggested_savings_max.is_zero() {
            None
        } else {
            let months = (amount_needed.amount() / capacity.suggested_savings_max.amount())
                .ceil()
                .to_u64()
                .unwrap_or(0);
            Some(format!("Extend deadline to {months} months"))
        };
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Warning,
            message: format!(
                "Current timeline not feasible. Need {monthly_requirement}/month but only {} available.",
                capacity.remaining_income
            ),
            action,
        });
    }

    // Expense optimization.
    let window = MonthWindow::of(today);
    let non_essential_total: Money = expenses
        .iter()
        .filter(|e| window.contains(e.date) && e.kind == ExpenseKind::NonEssential)
        .map(|e| e.amount)
        .sum();
    if non_essential_total > capacity.remaining_income.scale(Decimal::new(3, 1)) {
        let potential = non_essential_total.scale(Decimal::new(3, 1));
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Expense,
            message: format!(
                "You spent {non_essential_total} on non-essentials this month. Reducing by 30% could free up {potential}."
            ),
            action: Some("Review non-essential expenses".to_string()),
        });
    }

    // Savings improvement.
    if monthly_requirement > capacity.suggested_savings_max
        && monthly_requirement <= capacity.remaining_income.scale(Decimal::new(6, 1))
    {
        let share = monthly_requirement.ratio_of(capacity.remaining_income) * 100.0;
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Savings,
            message: format!(
                "To reach this goal faster, aim to save {share:.0}% of your remaining income instead of the recommended 30-40%."
            ),
            action: None,
        });
    }

    // Progress encouragement.
    let progress = goal.progress() * 100.0;
    if progress > 50.0 {
        suggestions.push(GoalSuggestion {
            kind: SuggestionKind::Success,
            message: format!("You're {progress:.0}% there! Keep up the momentum."),
            action: None,
        });
    }

    suggestions
}
