use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Essential/non-essential split used by the budgeting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseKind {
    Essential,
    NonEssential,
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseKind::Essential => write!(f, "essential"),
            ExpenseKind::NonEssential => write!(f, "non-essential"),
        }
    }
}

impl std::str::FromStr for ExpenseKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "essential" => Ok(ExpenseKind::Essential),
            "non-essential" => Ok(ExpenseKind::NonEssential),
            other => Err(format!("Unknown expense kind: '{other}'")),
        }
    }
}

/// An expense extracted from an imported file, before the caller has
/// assigned identity and ownership.
///
/// Every parser upholds the same contract: `amount` is strictly positive,
/// `date` is a real calendar date (the import day when the source value
/// could not be parsed), and `description` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExpense {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub kind: ExpenseKind,
    pub description: String,
}

impl DraftExpense {
    /// Promote a draft into a persistable record owned by `user_id`.
    /// The id and creation timestamp are left for the storage layer.
    pub fn into_expense(self, user_id: &str) -> Expense {
        Expense {
            id: None,
            user_id: user_id.to_string(),
            amount: self.amount,
            category: self.category,
            date: self.date,
            kind: self.kind,
            description: self.description,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<i64>,
    pub user_id: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub kind: ExpenseKind,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}
