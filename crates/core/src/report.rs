use serde::Serialize;
use std::fmt;

use super::expense::DraftExpense;

/// Why a row was left out of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row had no content at all.
    BlankRow,
    /// Row had fewer fields than the fixed schema needs.
    TooFewFields { found: usize },
    /// Amount field could not be read as a number.
    BadAmount { raw: String },
    /// Amount parsed but was zero or negative.
    NonPositiveAmount { raw: String },
    /// Line looked like a summary/footer row, not a transaction.
    SummaryLine,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankRow => write!(f, "blank row"),
            SkipReason::TooFewFields { found } => {
                write!(f, "expected at least 3 fields, found {found}")
            }
            SkipReason::BadAmount { raw } => write!(f, "unparseable amount '{raw}'"),
            SkipReason::NonPositiveAmount { raw } => {
                write!(f, "non-positive amount '{raw}'")
            }
            SkipReason::SummaryLine => write!(f, "summary line"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Zero-based row (or candidate-line) index within the source.
    pub row: usize,
    pub reason: SkipReason,
}

/// The outcome of parsing one file: the records that survived, plus a
/// per-row account of what was dropped. Callers that only want the
/// best-effort record list read `records` and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub records: Vec<DraftExpense>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn push_skip(&mut self, row: usize, reason: SkipReason) {
        self.skipped.push(SkippedRow { row, reason });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
