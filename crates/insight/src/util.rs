use chrono::NaiveDate;

use kosha_core::{Expense, Money, MonthWindow};

/// Months between two dates on the 30-day-month convention the planning
/// arithmetic uses throughout. Negative when `deadline` is in the past.
pub fn months_until(today: NaiveDate, deadline: NaiveDate) -> f64 {
    (deadline - today).num_days() as f64 / 30.0
}

/// Total spend within a calendar month.
pub fn month_total(expenses: &[Expense], window: MonthWindow) -> Money {
    expenses
        .iter()
        .filter(|e| window.contains(e.date))
        .map(|e| e.amount)
        .sum()
}
