//! Shared heuristics for coercing loosely formatted strings into amounts
//! and dates. All three import parsers funnel through these.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Keep digits, sign, and decimal point; currency symbols, spaces and
/// thousands separators are dropped.
pub fn clean_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = clean_amount(raw);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Day-first forms are tried before month-first, so `12/01/2024` reads as
/// 12 January. The two-digit-year forms must come before every `%Y` form:
/// `%Y` accepts a two-digit year, so `12/01/24` would otherwise parse as
/// year 12. The reverse confusion cannot happen, since `%d` and `%y` cap
/// at two digits and reject four-digit groups.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
];

pub fn parse_date_loose(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Spreadsheet serial days on the 1899-12-30 epoch (the 1900 date system
/// with its Lotus leap-year quirk baked into the offset).
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.trunc() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── amounts ──────────────────────────────────────────────────────────────

    #[test]
    fn clean_amount_strips_currency_and_separators() {
        assert_eq!(clean_amount("₹1,234.56"), "1234.56");
        assert_eq!(clean_amount("Rs. 500"), "500");
        assert_eq!(clean_amount("$ -42.00"), "-42.00");
    }

    #[test]
    fn parse_amount_plain() {
        assert_eq!(parse_amount("123.45"), Some(Decimal::new(12345, 2)));
        assert_eq!(parse_amount("1,000"), Some(Decimal::from(1000)));
    }

    #[test]
    fn parse_amount_garbage_is_none() {
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12.34.56"), None);
    }

    // ── dates ────────────────────────────────────────────────────────────────

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_date_iso() {
        assert_eq!(parse_date_loose("2024-01-15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date_loose("2024/01/15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date_loose("2024.01.15"), Some(d(2024, 1, 15)));
    }

    #[test]
    fn parse_date_day_first_preferred() {
        assert_eq!(parse_date_loose("12/01/2024"), Some(d(2024, 1, 12)));
        assert_eq!(parse_date_loose("12-01-2024"), Some(d(2024, 1, 12)));
        assert_eq!(parse_date_loose("12.01.2024"), Some(d(2024, 1, 12)));
    }

    #[test]
    fn parse_date_month_first_when_day_slot_overflows() {
        // 15 can only be a day, so the US form still parses.
        assert_eq!(parse_date_loose("01/15/2024"), Some(d(2024, 1, 15)));
    }

    #[test]
    fn parse_date_two_digit_year() {
        assert_eq!(parse_date_loose("12/01/24"), Some(d(2024, 1, 12)));
        assert_eq!(parse_date_loose("12-01-24"), Some(d(2024, 1, 12)));
        assert_eq!(parse_date_loose("12.01.24"), Some(d(2024, 1, 12)));
    }

    #[test]
    fn parse_date_invalid_is_none() {
        assert_eq!(parse_date_loose("not-a-date"), None);
        assert_eq!(parse_date_loose("32/13/2024"), None);
    }

    // ── serial days ──────────────────────────────────────────────────────────

    #[test]
    fn serial_to_date_known_values() {
        assert_eq!(serial_to_date(45306.0), Some(d(2024, 1, 15)));
        assert_eq!(serial_to_date(45306.75), Some(d(2024, 1, 15))); // time part ignored
        assert_eq!(serial_to_date(1.0), Some(d(1899, 12, 31)));
    }

    #[test]
    fn serial_to_date_rejects_non_positive() {
        assert_eq!(serial_to_date(0.0), None);
        assert_eq!(serial_to_date(-5.0), None);
        assert_eq!(serial_to_date(f64::NAN), None);
    }
}
