//! Heuristic transaction scanner for statement text.
//!
//! Statement layouts vary wildly, so this is a best-effort pass: split the
//! extracted text into candidate lines, keep the ones carrying a
//! currency-like amount, and rebuild a draft expense from the pieces.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use kosha_core::normalize;
use kosha_core::{Classifier, DraftExpense, ImportReport, Money, SkipReason};

use crate::text::{ExtractError, TextSource};

pub const DOCUMENT_DESCRIPTION_PLACEHOLDER: &str = "Imported Transaction";

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_amount,
    r"(?i)(?:rs\.?|inr|₹|\$)?\s*(\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\d+(?:\.\d{2})?)");
re!(re_date,
    r"(\d{4}[-/.]\d{1,2}[-/.]\d{1,2})|(\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4})");
// Newlines, or the 4+ space runs that concatenated table cells leave behind.
re!(re_line_split, r"[\n\r]|\s{4,}");
re!(re_edge_trim, r"^\W+|\W+$");

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("No valid transactions found in PDF. Please try converting to CSV or Excel")]
    NoTransactions,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Extract text through `source` and scan it for transactions.
pub fn scan_document<S: TextSource>(
    source: &S,
    bytes: &[u8],
    today: NaiveDate,
    classifier: &Classifier,
) -> Result<ImportReport, ScanError> {
    let pages = source.page_texts(bytes)?;
    scan_text(&pages.join("\n"), today, classifier)
}

/// Scan already-extracted text for transaction-like lines.
pub fn scan_text(
    text: &str,
    today: NaiveDate,
    classifier: &Classifier,
) -> Result<ImportReport, ScanError> {
    let mut report = ImportReport::default();

    let lines = re_line_split()
        .split(text)
        .map(str::trim)
        .filter(|line| line.chars().count() > 5);

    for (idx, line) in lines.enumerate() {
        match scan_line(line, today, classifier) {
            LineOutcome::Record(expense) => report.records.push(expense),
            LineOutcome::Skip(reason) => {
                tracing::debug!(line = idx, %reason, "candidate line skipped");
                report.push_skip(idx, reason);
            }
            // Most statement lines are headers, addresses or boilerplate;
            // only lines that looked transactional are worth reporting.
            LineOutcome::NotTransaction => {}
        }
    }

    if report.is_empty() {
        return Err(ScanError::NoTransactions);
    }
    Ok(report)
}

// ── Line scanning ─────────────────────────────────────────────────────────────

enum LineOutcome {
    Record(DraftExpense),
    Skip(SkipReason),
    NotTransaction,
}

fn scan_line(line: &str, today: NaiveDate, classifier: &Classifier) -> LineOutcome {
    // Date first: pulling it out keeps its digit groups from being
    // mistaken for the amount.
    let (date, rest) = match re_date().find(line) {
        Some(m) => {
            let date = normalize::parse_date_loose(m.as_str()).unwrap_or(today);
            (date, format!("{}{}", &line[..m.start()], &line[m.end()..]))
        }
        None => (today, line.to_string()),
    };

    let Some((token_range, amount)) = best_amount(&rest) else {
        return LineOutcome::NotTransaction;
    };
    if amount <= Decimal::ZERO {
        return LineOutcome::Skip(SkipReason::NonPositiveAmount {
            raw: rest[token_range].trim().to_string(),
        });
    }

    let without_amount = format!("{}{}", &rest[..token_range.start], &rest[token_range.end..]);
    let description = re_edge_trim()
        .replace_all(without_amount.trim(), "")
        .to_string();

    // Footer rows like "Total: 5000" carry an amount but are not
    // transactions.
    if description.to_lowercase().contains("total") && description.chars().count() < 10 {
        return LineOutcome::Skip(SkipReason::SummaryLine);
    }

    let description = if description.chars().count() < 3 {
        DOCUMENT_DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        description
    };

    let category = classifier
        .infer_category(&description)
        .unwrap_or("General")
        .to_string();
    let kind = classifier.kind_for(&category);

    LineOutcome::Record(DraftExpense {
        amount: Money::from_decimal(amount),
        category,
        date,
        kind,
        description,
    })
}

/// Pick the amount token for a line. Tokens carrying a currency prefix or
/// a two-decimal fraction are strong signals and the first one wins;
/// otherwise fall back to the largest bare number, which on statement
/// rows is usually the transaction value rather than a quantity.
fn best_amount(text: &str) -> Option<(std::ops::Range<usize>, Decimal)> {
    let mut first_qualified: Option<(std::ops::Range<usize>, Decimal)> = None;
    let mut largest: Option<(std::ops::Range<usize>, Decimal)> = None;

    for caps in re_amount().captures_iter(text) {
        let (Some(full), Some(group)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(value) = normalize::parse_amount(group.as_str()) else {
            continue;
        };

        let prefix = &full.as_str()[..group.start() - full.start()];
        let qualified = group.as_str().contains('.') || !prefix.trim().is_empty();

        if qualified && first_qualified.is_none() {
            first_qualified = Some((full.range(), value));
        }
        if largest.as_ref().is_none_or(|(_, v)| value > *v) {
            largest = Some((full.range(), value));
        }
    }

    first_qualified.or(largest)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
