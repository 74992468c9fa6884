use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use kosha_core::normalize;
use kosha_core::{Classifier, DraftExpense, ImportReport, Money, SkipReason};

pub const SHEET_DESCRIPTION_PLACEHOLDER: &str = "Imported Expense";

const AMOUNT_HEADERS: &[&str] = &["amount", "cost", "price"];
const DATE_HEADERS: &[&str] = &["date", "time"];
const CATEGORY_HEADERS: &[&str] = &["category", "type"];
const DESCRIPTION_HEADERS: &[&str] = &["description", "desc", "details", "note"];

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Workbook has no sheets")]
    NoWorksheet,
    #[error("Could not find an \"Amount\" column. Please check the sheet headers")]
    MissingAmountColumn,
}

/// Parse the first sheet of a binary workbook (xlsx or xls).
pub fn parse_bytes(
    bytes: &[u8],
    today: NaiveDate,
    classifier: &Classifier,
) -> Result<ImportReport, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;
    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
    parse_grid(&rows, today, classifier)
}

/// Core row logic over an owned cell grid, split out so tests can build
/// grids directly instead of shipping workbook fixtures.
pub fn parse_grid(
    rows: &[Vec<Data>],
    today: NaiveDate,
    classifier: &Classifier,
) -> Result<ImportReport, SheetError> {
    // Header-row sniff: the first row mentioning "amount" or "date"
    // anywhere. Sheets exported from other tools often carry a title row
    // or two above the real table.
    let header_idx = rows
        .iter()
        .position(|row| {
            row.iter().any(|cell| {
                let text = cell_text(cell).to_lowercase();
                text.contains("amount") || text.contains("date")
            })
        })
        .unwrap_or(0);

    let headers: Vec<String> = rows
        .get(header_idx)
        .map(|row| {
            row.iter()
                .map(|cell| cell_text(cell).trim().to_lowercase())
                .collect()
        })
        .unwrap_or_default();

    let find_column =
        |needles: &[&str]| headers.iter().position(|h| needles.iter().any(|n| h.contains(n)));

    let amount_col = find_column(AMOUNT_HEADERS).ok_or(SheetError::MissingAmountColumn)?;
    let date_col = find_column(DATE_HEADERS);
    let category_col = find_column(CATEGORY_HEADERS);
    let description_col = find_column(DESCRIPTION_HEADERS);

    let mut report = ImportReport::default();

    for (idx, row) in rows.iter().enumerate().skip(header_idx + 1) {
        if row.iter().all(is_blank) {
            report.push_skip(idx, SkipReason::BlankRow);
            continue;
        }

        let amount_cell = row.get(amount_col);
        let Some(amount) = amount_cell.and_then(cell_amount) else {
            let raw = amount_cell.map(cell_text).unwrap_or_default();
            tracing::debug!(row = idx, raw, "unparseable amount cell");
            report.push_skip(idx, SkipReason::BadAmount { raw });
            continue;
        };
        if amount <= Decimal::ZERO {
            report.push_skip(
                idx,
                SkipReason::NonPositiveAmount {
                    raw: amount_cell.map(cell_text).unwrap_or_default(),
                },
            );
            continue;
        }

        let date = date_col
            .and_then(|col| row.get(col))
            .and_then(cell_date)
            .unwrap_or(today);
        let category = category_col
            .and_then(|col| row.get(col))
            .map(cell_text)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "General".to_string());
        let description = description_col
            .and_then(|col| row.get(col))
            .map(cell_text)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| SHEET_DESCRIPTION_PLACEHOLDER.to_string());

        report.records.push(DraftExpense {
            amount: Money::from_decimal(amount),
            kind: classifier.kind_for(&category),
            category,
            date,
            description,
        });
    }

    Ok(report)
}

// ── Cell coercion ─────────────────────────────────────────────────────────────

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn is_blank(cell: &Data) -> bool {
    matches!(cell, Data::Empty) || cell_text(cell).trim().is_empty()
}

/// Numeric cells are taken as-is; strings go through the shared cleaner.
fn cell_amount(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Float(f) => Decimal::try_from(*f).ok(),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => normalize::parse_amount(s),
        _ => None,
    }
}

/// Numeric cells are spreadsheet serial days; strings get the loose parse.
fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::Float(f) => normalize::serial_to_date(*f),
        Data::Int(i) => normalize::serial_to_date(*i as f64),
        Data::DateTime(dt) => normalize::serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.get(..10).and_then(normalize::parse_date_loose),
        Data::String(s) => normalize::parse_date_loose(s),
        _ => None,
    }
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

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn parse(rows: &[Vec<Data>]) -> Result<ImportReport, SheetError> {
        parse_grid(rows, today(), &Classifier::default())
    }

    // ── header resolution ────────────────────────────────────────────────────

    #[test]
    fn standard_headers_parse_rows() {
        let rows = vec![
            vec![s("Amount"), s("Category"), s("Date"), s("Description")],
            vec![Data::Float(450.0), s("Food"), Data::Float(45306.0), s("Swiggy")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records.len(), 1);
        let e = &report.records[0];
        assert_eq!(e.amount, Money::new(450));
        assert_eq!(e.date, d(2024, 1, 15));
        assert_eq!(e.kind, ExpenseKind::Essential);
    }

    #[test]
    fn cost_header_resolves_amount_column() {
        let rows = vec![
            vec![s("Cost"), s("Date")],
            vec![Data::Float(120.0), s("2024-01-15")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records[0].amount, Money::new(120));
    }

    #[test]
    fn missing_amount_column_is_an_error() {
        let rows = vec![
            vec![s("Date"), s("Notes")],
            vec![s("2024-01-15"), s("something")],
        ];
        assert!(matches!(parse(&rows), Err(SheetError::MissingAmountColumn)));
    }

    #[test]
    fn header_row_is_sniffed_below_a_title() {
        let rows = vec![
            vec![s("My expenses for January")],
            vec![s("Amount"), s("Category")],
            vec![Data::Float(300.0), s("Transport")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].category, "Transport");
    }

    #[test]
    fn one_header_can_fill_several_roles() {
        // "datetime" resolves the date column and "type" the category
        // column; substring matching is independent per role.
        let rows = vec![
            vec![s("Price"), s("Type"), s("Datetime")],
            vec![Data::Float(99.0), s("Entertainment"), s("15/01/2024")],
        ];
        let report = parse(&rows).unwrap();
        let e = &report.records[0];
        assert_eq!(e.category, "Entertainment");
        assert_eq!(e.date, d(2024, 1, 15));
    }

    // ── cell coercion ────────────────────────────────────────────────────────

    #[test]
    fn string_amount_cells_are_cleaned() {
        let rows = vec![
            vec![s("Amount"), s("Category")],
            vec![s("₹1,250.50"), s("Food")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(
            report.records[0].amount,
            Money::from_decimal(Decimal::new(125050, 2))
        );
    }

    #[test]
    fn serial_date_cells_convert_from_epoch() {
        let rows = vec![
            vec![s("Amount"), s("Date")],
            vec![Data::Float(100.0), Data::Int(45306)],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records[0].date, d(2024, 1, 15));
    }

    #[test]
    fn unparseable_date_falls_back_to_import_day() {
        let rows = vec![
            vec![s("Amount"), s("Date")],
            vec![Data::Float(100.0), s("soon")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records[0].date, today());
    }

    #[test]
    fn two_digit_year_date_cells_expand_to_2000s() {
        let rows = vec![
            vec![s("Amount"), s("Date")],
            vec![Data::Float(100.0), s("12/01/24")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records[0].date, d(2024, 1, 12));
    }

    #[test]
    fn defaults_for_missing_category_and_description() {
        let rows = vec![
            vec![s("Amount")],
            vec![Data::Float(100.0)],
        ];
        let report = parse(&rows).unwrap();
        let e = &report.records[0];
        assert_eq!(e.category, "General");
        assert_eq!(e.description, SHEET_DESCRIPTION_PLACEHOLDER);
        assert_eq!(e.kind, ExpenseKind::NonEssential);
    }

    // ── row skipping ─────────────────────────────────────────────────────────

    #[test]
    fn bad_rows_are_skipped_with_reasons() {
        let rows = vec![
            vec![s("Amount"), s("Category")],
            vec![s("n/a"), s("Food")],
            vec![Data::Float(-20.0), s("Food")],
            vec![Data::Empty, Data::Empty],
            vec![Data::Float(450.0), s("Food")],
        ];
        let report = parse(&rows).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 3);
        assert!(report.records.iter().all(|e| e.amount > Money::zero()));
    }

    #[test]
    fn empty_sheet_yields_empty_report_not_error() {
        let rows = vec![
            vec![s("Amount"), s("Category")],
            vec![s("n/a"), s("Food")],
        ];
        let report = parse(&rows).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn parse_is_idempotent() {
        let rows = vec![
            vec![s("Amount"), s("Category")],
            vec![Data::Float(450.0), s("Food")],
        ];
        assert_eq!(parse(&rows).unwrap(), parse(&rows).unwrap());
    }
}
