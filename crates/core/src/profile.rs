use serde::{Deserialize, Serialize};

use super::money::Money;

/// Recurring household expenses an employee declares during onboarding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedExpenses {
    pub rent: Money,
    pub groceries: Money,
    pub utilities: Money,
}

impl FixedExpenses {
    pub fn total(&self) -> Money {
        self.rent + self.groceries + self.utilities
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanEmis {
    pub home: Money,
    pub car: Money,
    pub personal: Money,
    pub education: Money,
}

impl LoanEmis {
    pub fn total(&self) -> Money {
        self.home + self.car + self.personal + self.education
    }
}

/// The financial shape of a user. Students budget on pocket money;
/// employees carry the full commitment structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserProfile {
    Student {
        weekly_pocket_money: Money,
        weekly_expenses: Money,
    },
    Employee {
        monthly_income: Money,
        #[serde(default)]
        fixed_expenses: FixedExpenses,
        #[serde(default)]
        loans: LoanEmis,
        #[serde(default)]
        sip_commitments: Money,
    },
}

impl UserProfile {
    /// Month-equivalent income. Pocket money is weekly; four weeks per month.
    pub fn monthly_income(&self) -> Money {
        match self {
            UserProfile::Student { weekly_pocket_money, .. } => {
                weekly_pocket_money.scale(4.into())
            }
            UserProfile::Employee { monthly_income, .. } => *monthly_income,
        }
    }

    /// Fixed monthly commitments: estimated weekly spend for students,
    /// declared expenses plus EMIs plus SIPs for employees.
    pub fn monthly_commitments(&self) -> Money {
        match self {
            UserProfile::Student { weekly_expenses, .. } => weekly_expenses.scale(4.into()),
            UserProfile::Employee { fixed_expenses, loans, sip_commitments, .. } => {
                fixed_expenses.total() + loans.total() + *sip_commitments
            }
        }
    }
}
