use rust_decimal::Decimal;
use serde::Serialize;

use kosha_core::{Money, UserProfile};

/// One line of the capacity breakdown shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub label: &'static str,
    pub amount: Money,
    /// Share of monthly income, in percent.
    pub percentage: f64,
}

/// How much of an employee's income is already spoken for, and the
/// savings band we suggest for what is left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsCapacity {
    pub monthly_income: Money,
    pub fixed_expenses: Money,
    pub loan_emis: Money,
    pub sip_commitments: Money,
    pub total_commitments: Money,
    pub remaining_income: Money,
    /// 30% of remaining income.
    pub suggested_savings_min: Money,
    /// 40% of remaining income.
    pub suggested_savings_max: Money,
    pub breakdown: Vec<BreakdownLine>,
}

/// Employees only: students have no commitment structure to decompose,
/// so they get `None`.
pub fn savings_capacity(profile: &UserProfile) -> Option<SavingsCapacity> {
    let UserProfile::Employee { monthly_income, fixed_expenses, loans, sip_commitments } = profile
    else {
        return None;
    };

    let income = *monthly_income;
    let fixed = fixed_expenses.total();
    let emis = loans.total();
    let sips = *sip_commitments;

    let total_commitments = fixed + emis + sips;
    let remaining_income = income - total_commitments;

    let pct = |amount: Money| amount.ratio_of(income) * 100.0;
    let breakdown = vec![
        BreakdownLine { label: "Fixed Expenses", amount: fixed, percentage: pct(fixed) },
        BreakdownLine { label: "Loan EMIs", amount: emis, percentage: pct(emis) },
        BreakdownLine { label: "SIP Commitments", amount: sips, percentage: pct(sips) },
        BreakdownLine {
            label: "Available for Savings & Expenses",
            amount: remaining_income,
            percentage: pct(remaining_income),
        },
    ];

    Some(SavingsCapacity {
        monthly_income: income,
        fixed_expenses: fixed,
        loan_emis: emis,
        sip_commitments: sips,
        total_commitments,
        remaining_income,
        suggested_savings_min: remaining_income.scale(Decimal::new(3, 1)),
        suggested_savings_max: remaining_income.scale(Decimal::new(4, 1)),
        breakdown,
    })
}
