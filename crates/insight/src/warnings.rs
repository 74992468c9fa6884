use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use kosha_core::{Expense, ExpenseKind, Goal, Money, MonthWindow, UserProfile};

use crate::util::{month_total, months_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// A rule-based nudge surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartWarning {
    /// Stable identifier so the UI can dedupe and dismiss.
    pub code: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
}

/// Month-over-month spending spike: current month more than 20% above the
/// previous one.
pub fn spending_trend_warnings(expenses: &[Expense], today: NaiveDate) -> Vec<SmartWarning> {
    let mut warnings = Vec::new();

    let current_window = MonthWindow::of(today);
    let current = month_total(expenses, current_window);
    let last = month_total(expenses, current_window.previous());

    if !last.is_zero() && current > last.scale(Decimal::new(12, 1)) {
        warnings.push(SmartWarning {
            code: "trend-spike",
            severity: Severity::Warning,
            title: "Spending Spike Detected",
            message: "You've spent 20% more this month compared to last month. \
                      Check your recent transactions."
                .to_string(),
        });
    }

    warnings
}

/// Non-essential spending beyond 30% of monthly income.
pub fn non_essential_limit_warning(
    expenses: &[Expense],
    profile: &UserProfile,
    today: NaiveDate,
) -> Option<SmartWarning> {
    let window = MonthWindow::of(today);
    let non_essential: Money = expenses
        .iter()
        .filter(|e| window.contains(e.date) && e.kind == ExpenseKind::NonEssential)
        .map(|e| e.amount)
        .sum();

    let income = profile.monthly_income();
    if income.is_zero() || non_essential <= income.scale(Decimal::new(3, 1)) {
        return None;
    }

    let share = non_essential.ratio_of(income) * 100.0;
    Some(SmartWarning {
        code: "limit-non-essential",
        severity: Severity::Danger,
        title: "High Discretionary Spending",
        message: format!(
            "Your non-essential spending is {share:.0}% of your income. Recommended limit is 30%."
        ),
    })
}

/// Whether this month's remaining budget still covers the combined
/// monthly need of every unfinished goal.
pub fn goal_threat_warnings(
    expenses: &[Expense],
    goals: &[Goal],
    profile: &UserProfile,
    today: NaiveDate,
) -> Vec<SmartWarning> {
    let mut warnings = Vec::new();

    let income = profile.monthly_income();
    let commitments = profile.monthly_commitments();
    let spent = month_total(expenses, MonthWindow::of(today));
    let remaining_budget = income - commitments - spent;

    let mut total_monthly_need = Money::zero();
    for goal in goals.iter().filter(|g| !g.is_achieved()) {
        let months = months_until(today, goal.deadline).max(1.0);
        let months_dec = Decimal::from_f64(months).unwrap_or(Decimal::ONE);
        total_monthly_need += Money::from_decimal(goal.remaining().amount() / months_dec);
    }

    if !total_monthly_need.is_zero() && remaining_budget < total_monthly_need {
        let gap = total_monthly_need - remaining_budget;
        warnings.push(SmartWarning {
            code: "goal-threat",
            severity: Severity::Warning,
            title: "Goals at Risk",
            message: format!(
                "Your current spending might impact your ability to reach your goals. \
                 You need {gap} more to stay on track."
            ),
        });
    }

    warnings
}
