use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use kosha_core::{Expense, Goal, Money, MonthWindow, UserProfile};

/// The month-end summary card: totals, score and headline insights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: &'static str,
    pub year: i32,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Percent of income left unspent.
    pub savings_rate: f64,
    pub top_expense_category: String,
    /// Mean progress across unfinished goals, in percent.
    pub goal_progress: f64,
    /// 0-100 composite financial-health score.
    pub score: u8,
    pub insights: Vec<String>,
}

/// Tone of the dashboard greeting, from how much of the month's income
/// has been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingMood {
    Positive,
    Neutral,
    Caution,
}

/// Quick temperature check on the current month's spending ratio.
pub fn spending_mood(
    expenses: &[Expense],
    profile: &UserProfile,
    today: NaiveDate,
) -> (SpendingMood, &'static str) {
    let window = MonthWindow::of(today);
    let spent: Money = expenses
        .iter()
        .filter(|e| window.contains(e.date))
        .map(|e| e.amount)
        .sum();
    let ratio = spent.ratio_of(profile.monthly_income());

    if ratio < 0.5 {
        (SpendingMood::Positive, "You're doing amazing! Your discipline is inspiring.")
    } else if ratio < 0.8 {
        (SpendingMood::Neutral, "Good balance! You're enjoying life while staying responsible.")
    } else {
        (SpendingMood::Caution, "Whoa there! Spending is heating up. Let's cool down a bit?")
    }
}

pub fn monthly_report(
    expenses: &[Expense],
    goals: &[Goal],
    profile: &UserProfile,
    today: NaiveDate,
) -> MonthlyReport {
    let window = MonthWindow::of(today);
    let monthly: Vec<&Expense> = expenses.iter().filter(|e| window.contains(e.date)).collect();

    let total_expenses: Money = monthly.iter().map(|e| e.amount).sum();
    let income = profile.monthly_income();

    let savings = income.saturating_sub(total_expenses);
    let savings_rate = savings.ratio_of(income) * 100.0;

    let mut by_category: HashMap<&str, Money> = HashMap::new();
    for e in &monthly {
        *by_category.entry(e.category.as_str()).or_insert_with(Money::zero) += e.amount;
    }
    let top_expense_category = by_category
        .iter()
        .max_by_key(|(_, amount)| **amount)
        .map(|(category, _)| category.to_string())
        .unwrap_or_else(|| "None".to_string());

    let active: Vec<&Goal> = goals.iter().filter(|g| !g.is_achieved()).collect();
    let goal_progress = if active.is_empty() {
        100.0
    } else {
        active.iter().map(|g| g.progress()).sum::<f64>() / active.len() as f64 * 100.0
    };

    let mut score = 50u8;
    if savings_rate > 20.0 {
        score += 20;
    }
    if savings_rate > 40.0 {
        score += 10;
    }
    if total_expenses < income.scale(Decimal::new(8, 1)) {
        score += 10;
    }
    if goal_progress > 10.0 {
        score += 10;
    }
    let score = score.min(100);

    let insights = vec![
        if savings_rate > 20.0 {
            "Great savings rate this month!".to_string()
        } else {
            "Try to boost your savings next month.".to_string()
        },
        format!("Your biggest expense was {top_expense_category}."),
        if goal_progress > 0.0 {
            "You're making steady progress on goals.".to_string()
        } else {
            "Time to start funding your goals!".to_string()
        },
    ];

    MonthlyReport {
        month: window.name(),
        year: window.year,
        total_income: income,
        total_expenses,
        savings_rate,
        top_expense_category,
        goal_progress,
        score,
        insights,
    }
}
