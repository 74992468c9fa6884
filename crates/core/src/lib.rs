pub mod category;
pub mod expense;
pub mod goal;
pub mod money;
pub mod normalize;
pub mod period;
pub mod profile;
pub mod report;

pub use category::{CategoryRule, Classifier, ClassifierError};
pub use expense::{DraftExpense, Expense, ExpenseKind};
pub use goal::Goal;
pub use money::Money;
pub use period::MonthWindow;
pub use profile::{FixedExpenses, LoanEmis, UserProfile};
pub use report::{ImportReport, SkipReason, SkippedRow};
