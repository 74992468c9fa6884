pub mod capacity;
pub mod feasibility;
pub mod funds;
pub mod plan;
pub mod report;
pub mod warnings;
pub(crate) mod util;

pub use capacity::{savings_capacity, BreakdownLine, SavingsCapacity};
pub use feasibility::{
    goal_feasibility, goal_savings, goal_suggestions, Feasibility, GoalSavingsPlan,
    GoalSuggestion, SuggestionKind,
};
pub use funds::{recommend, Fund, FundSource, Recommendation, RiskProfile, StaticFundSource};
pub use plan::{commitment_recommendations, spending_range, CommitmentCategory, GoalType, SpendingRange};
pub use report::{monthly_report, spending_mood, MonthlyReport, SpendingMood};
pub use warnings::{
    goal_threat_warnings, non_essential_limit_warning, spending_trend_warnings, Severity,
    SmartWarning,
};
