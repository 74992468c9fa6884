use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use kosha_core::normalize;
use kosha_core::{Classifier, DraftExpense, ImportReport, Money, SkipReason};

pub const CSV_DESCRIPTION_PLACEHOLDER: &str = "Imported from CSV";

const HEADER_KEYWORDS: &[&str] = &["amount", "category", "date", "description"];

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No valid expenses found in CSV")]
    NoValidRows,
}

/// Parse a fixed-schema CSV: Amount, Category, Date, Description.
///
/// The first row is skipped when it looks like a label row. Individual
/// bad rows never abort the parse; they are recorded in the report's
/// skip list instead.
pub fn parse_csv(
    content: &str,
    today: NaiveDate,
    classifier: &Classifier,
) -> Result<ImportReport, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut report = ImportReport::default();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;

        if idx == 0 && is_header(&record) {
            continue;
        }
        if record.iter().all(|f| f.is_empty()) {
            report.push_skip(idx, SkipReason::BlankRow);
            continue;
        }
        if record.len() < 3 {
            tracing::debug!(row = idx, fields = record.len(), "row too short");
            report.push_skip(idx, SkipReason::TooFewFields { found: record.len() });
            continue;
        }

        let amount_raw = record.get(0).unwrap_or_default();
        let Some(amount) = normalize::parse_amount(amount_raw) else {
            tracing::debug!(row = idx, amount_raw, "unparseable amount");
            report.push_skip(idx, SkipReason::BadAmount { raw: amount_raw.to_string() });
            continue;
        };
        if amount <= Decimal::ZERO {
            report.push_skip(idx, SkipReason::NonPositiveAmount { raw: amount_raw.to_string() });
            continue;
        }

        let category = non_empty(record.get(1)).unwrap_or("General").to_string();
        let date = record
            .get(2)
            .and_then(normalize::parse_date_loose)
            .unwrap_or(today);
        let description = non_empty(record.get(3))
            .unwrap_or(CSV_DESCRIPTION_PLACEHOLDER)
            .to_string();

        report.records.push(DraftExpense {
            amount: Money::from_decimal(amount),
            kind: classifier.kind_for(&category),
            category,
            date,
            description,
        });
    }

    if report.is_empty() {
        return Err(CsvImportError::NoValidRows);
    }
    Ok(report)
}

fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| {
        let field = field.to_lowercase();
        HEADER_KEYWORDS.iter().any(|k| field.contains(k))
    })
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kosha_core::ExpenseKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 1)
    }

    fn parse(content: &str) -> Result<ImportReport, CsvImportError> {
        parse_csv(content, today(), &Classifier::default())
    }

    // ── header handling ──────────────────────────────────────────────────────

    #[test]
    fn header_row_is_never_a_record() {
        let report = parse("Amount,Category,Date,Description\n450,Food,2024-01-12,Swiggy\n").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].description, "Swiggy");
    }

    #[test]
    fn headerless_input_keeps_first_row() {
        let report = parse("450,Food,2024-01-12,Swiggy\n500,Transport,2024-01-13,Fuel\n").unwrap();
        assert_eq!(report.records.len(), 2);
    }

    // ── field parsing ────────────────────────────────────────────────────────

    #[test]
    fn quoted_fields_keep_commas() {
        let report = parse("450,Food,2024-01-12,\"Dinner, two plates\"\n").unwrap();
        assert_eq!(report.records[0].description, "Dinner, two plates");
    }

    #[test]
    fn currency_symbols_in_amount_are_cleaned() {
        let report = parse("\"₹1,250.50\",Food,2024-01-12,Lunch\n").unwrap();
        assert_eq!(report.records[0].amount, Money::from_decimal(Decimal::new(125050, 2)));
    }

    #[test]
    fn missing_description_gets_placeholder() {
        let report = parse("450,Food,2024-01-12\n").unwrap();
        assert_eq!(report.records[0].description, CSV_DESCRIPTION_PLACEHOLDER);
    }

    #[test]
    fn unparseable_date_falls_back_to_import_day() {
        let report = parse("450,Food,someday,Swiggy\n").unwrap();
        assert_eq!(report.records[0].date, today());
    }

    #[test]
    fn two_digit_year_dates_expand_to_2000s() {
        let report = parse("450,Food,12/01/24,Swiggy\n").unwrap();
        assert_eq!(report.records[0].date, d(2024, 1, 12));
    }

    #[test]
    fn kind_follows_essential_keywords() {
        let report = parse("450,Food,2024-01-12,a\n300,Entertainment,2024-01-13,b\n").unwrap();
        assert_eq!(report.records[0].kind, ExpenseKind::Essential);
        assert_eq!(report.records[1].kind, ExpenseKind::NonEssential);
    }

    // ── skipping ─────────────────────────────────────────────────────────────

    #[test]
    fn short_rows_are_skipped_with_reason() {
        let report = parse("450,Food\n500,Transport,2024-01-13,Fuel\n").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::TooFewFields { found: 2 });
    }

    #[test]
    fn non_positive_amounts_are_skipped() {
        let content = "0,Food,2024-01-12,zero\n-50,Food,2024-01-12,minus\n450,Food,2024-01-12,ok\n";
        let report = parse(content).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.records.iter().all(|e| e.amount > Money::zero()));
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn bad_amount_is_skipped_with_raw_value() {
        let report = parse("n/a,Food,2024-01-12,x\n450,Food,2024-01-12,ok\n").unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::BadAmount { raw: "n/a".into() });
    }

    // ── failure modes ────────────────────────────────────────────────────────

    #[test]
    fn zero_valid_records_is_an_error() {
        assert!(matches!(
            parse("Amount,Category,Date,Description\n"),
            Err(CsvImportError::NoValidRows)
        ));
        assert!(matches!(
            parse("0,Food,2024-01-12,zero\n"),
            Err(CsvImportError::NoValidRows)
        ));
    }

    #[test]
    fn parse_is_idempotent() {
        let content = "450,Food,2024-01-12,Swiggy\nn/a,Food,2024-01-13,bad\n";
        assert_eq!(parse(content).unwrap(), parse(content).unwrap());
    }
}
