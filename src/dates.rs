// ==========================================
// EA Portal Data Core - date normalization utility
// ==========================================
// Scope: Excel serials, ambiguous DD/MM vs MM/DD text, ISO text,
// date-typed cells -> canonical DD/MM/YYYY display strings
// ==========================================
// Spreadsheet exports mix locale conventions; a day value > 12 is the
// only reliable disambiguation signal without a format hint column.
// ==========================================

use crate::domain::types::CellValue;
use chrono::{Datelike, Duration, NaiveDate};

/// Canonical display format for every normalized date.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Days between Excel serial 0 (1900 system) and the Unix epoch.
/// The offset also absorbs the historical Excel 1900 leap-year bug:
/// serial 25569 = 01/01/1970, serial 1 = 31/12/1899.
const EXCEL_1900_EPOCH_OFFSET_DAYS: f64 = 25569.0;

/// Same offset for the 1904 date system (classic Mac workbooks).
const EXCEL_1904_EPOCH_OFFSET_DAYS: f64 = 24107.0;

/// Which Excel date system a serial number was written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochSystem {
    Date1900,
    Date1904,
}

/// Raw serial -> calendar conversion. `None` for non-finite input;
/// callers must check before formatting.
pub fn excel_serial_to_date(serial: f64, epoch: EpochSystem) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let offset = match epoch {
        EpochSystem::Date1900 => EXCEL_1900_EPOCH_OFFSET_DAYS,
        EpochSystem::Date1904 => EXCEL_1904_EPOCH_OFFSET_DAYS,
    };
    let days = (serial - offset).floor() as i64;
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(Duration::days(days))
}

/// Strict parser for datasets whose source format is known to be
/// DD/MM/YYYY (the CART workflow export).
pub fn parse_ddmmyyyy(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT).ok()
}

pub fn format_ddmmyyyy(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Normalize any cell to DD/MM/YYYY display text, `None` when the
/// value carries no interpretable date.
pub fn normalize_date(value: &CellValue) -> Option<String> {
    normalize_to_naive(value).map(format_ddmmyyyy)
}

/// Same normalization, returning the calendar date itself.
pub fn normalize_to_naive(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Empty => None,
        CellValue::Ymd { y, m, d } => NaiveDate::from_ymd_opt(*y, *m, *d),
        CellValue::Number(n) => excel_serial_to_date(*n, EpochSystem::Date1900),
        CellValue::Text(s) => parse_text_date(s),
    }
}

/// Text parsing ladder: slash heuristic, fixed dash formats, then a
/// short lenient tail (numeric text as a serial, spelled-out months).
fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Drop any trailing time component ("25/03/2024 10:30:00").
    let date_part = trimmed.split_whitespace().next()?;

    if let Some(date) = parse_slash_date(date_part) {
        return Some(date);
    }

    const DASH_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d-%Y", "%d-%m-%Y"];
    for format in DASH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }

    // Lenient last resort.
    if let Ok(serial) = date_part.parse::<f64>() {
        return excel_serial_to_date(serial, EpochSystem::Date1900);
    }
    const LENIENT_FORMATS: &[&str] = &["%Y/%m/%d", "%d-%b-%Y", "%d %b %Y", "%B %d, %Y"];
    for format in LENIENT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// `N/N/YYYY` with the day-value heuristic:
/// first group > 12 forces DD/MM, else second group > 12 forces MM/DD,
/// else try DD/MM first and fall back to MM/DD.
fn parse_slash_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 3 || parts[2].len() != 4 {
        return None;
    }
    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    if first > 12 {
        NaiveDate::from_ymd_opt(year, second, first)
    } else if second > 12 {
        NaiveDate::from_ymd_opt(year, first, second)
    } else {
        NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
    }
}

/// Whole calendar months between two dates (0 when `later < earlier`).
fn whole_months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    let mut months = (later.year() - earlier.year()) * 12 + later.month() as i32
        - earlier.month() as i32;
    if later.day() < earlier.day() {
        months -= 1;
    }
    months.max(0)
}

/// Largest non-zero unit among years/months/weeks/days as a
/// pluralized label; "0 Day" when the dates coincide.
pub fn date_difference_label(later: NaiveDate, earlier: NaiveDate) -> String {
    let days = (later - earlier).num_days().max(0);
    let months = whole_months_between(later, earlier) as i64;
    let years = months / 12;
    let weeks = days / 7;

    if years >= 1 {
        pluralize(years, "Year")
    } else if months >= 1 {
        pluralize(months, "Month")
    } else if weeks >= 1 {
        pluralize(weeks, "Week")
    } else {
        pluralize(days, "Day")
    }
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_canonical_string_round_trip() {
        // Already-canonical DD/MM/YYYY comes back unchanged.
        assert_eq!(
            normalize_date(&text("25/03/2024")),
            Some("25/03/2024".to_string())
        );
        assert_eq!(
            normalize_date(&text("01/02/2023")),
            Some("01/02/2023".to_string())
        );
    }

    #[test]
    fn test_excel_serial_epoch_convention() {
        // Fixed convention: serial 25569 = unix epoch day.
        assert_eq!(
            normalize_date(&CellValue::Number(25569.0)),
            Some("01/01/1970".to_string())
        );
        assert_eq!(
            normalize_date(&CellValue::Number(1.0)),
            Some("31/12/1899".to_string())
        );
    }

    #[test]
    fn test_excel_serial_modern_date() {
        // 45292 is 01/01/2024 in the 1900 system.
        assert_eq!(
            normalize_date(&CellValue::Number(45292.0)),
            Some("01/01/2024".to_string())
        );
        // Fractional serials carry a time-of-day component; floor it.
        assert_eq!(
            normalize_date(&CellValue::Number(45292.75)),
            Some("01/01/2024".to_string())
        );
    }

    #[test]
    fn test_excel_serial_invalid_input() {
        assert_eq!(excel_serial_to_date(f64::NAN, EpochSystem::Date1900), None);
        assert_eq!(
            excel_serial_to_date(f64::INFINITY, EpochSystem::Date1900),
            None
        );
    }

    #[test]
    fn test_excel_1904_system() {
        assert_eq!(
            excel_serial_to_date(24107.0, EpochSystem::Date1904),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
    }

    #[test]
    fn test_ambiguity_heuristic_agrees_on_both_orders() {
        // day > 12 in first group forces DD/MM; day > 12 in second
        // group forces MM/DD. Both spellings land on the same date.
        let a = normalize_date(&text("25/03/2024"));
        let b = normalize_date(&text("03/25/2024"));
        assert_eq!(a, Some("25/03/2024".to_string()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ambiguous_both_low_prefers_ddmm() {
        assert_eq!(
            normalize_date(&text("05/03/2024")),
            Some("05/03/2024".to_string())
        );
    }

    #[test]
    fn test_trailing_time_component_stripped() {
        assert_eq!(
            normalize_date(&text("25/03/2024 10:30:00")),
            Some("25/03/2024".to_string())
        );
        assert_eq!(
            normalize_date(&text("2024-03-25 10:30")),
            Some("25/03/2024".to_string())
        );
    }

    #[test]
    fn test_dash_formats() {
        assert_eq!(
            normalize_date(&text("2024-03-25")),
            Some("25/03/2024".to_string())
        );
        // MM-DD-YYYY tried before DD-MM-YYYY.
        assert_eq!(
            normalize_date(&text("03-25-2024")),
            Some("25/03/2024".to_string())
        );
        assert_eq!(
            normalize_date(&text("25-03-2024")),
            Some("25/03/2024".to_string())
        );
    }

    #[test]
    fn test_numeric_text_falls_back_to_serial() {
        assert_eq!(
            normalize_date(&text("45292")),
            Some("01/01/2024".to_string())
        );
    }

    #[test]
    fn test_ymd_cell_formats_directly() {
        assert_eq!(
            normalize_date(&CellValue::Ymd { y: 2024, m: 1, d: 5 }),
            Some("05/01/2024".to_string())
        );
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert_eq!(normalize_date(&text("not a date")), None);
        assert_eq!(normalize_date(&text("")), None);
        assert_eq!(normalize_date(&CellValue::Empty), None);
        // 13/13 is not a real date in either order.
        assert_eq!(normalize_date(&text("13/13/2024")), None);
    }

    #[test]
    fn test_strict_ddmmyyyy_parser() {
        assert_eq!(
            parse_ddmmyyyy("15/06/2024"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        // Strict: MM/DD spelling with day > 12 does not parse.
        assert_eq!(parse_ddmmyyyy("06/15/2024"), None);
    }

    #[test]
    fn test_difference_label_units() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(date_difference_label(day(2024, 6, 15), day(2023, 1, 1)), "1 Year");
        assert_eq!(date_difference_label(day(2025, 1, 2), day(2023, 1, 1)), "2 Years");
        assert_eq!(date_difference_label(day(2024, 3, 5), day(2024, 1, 4)), "2 Months");
        assert_eq!(date_difference_label(day(2024, 1, 11), day(2024, 1, 1)), "1 Week");
        assert_eq!(date_difference_label(day(2024, 1, 22), day(2024, 1, 1)), "3 Weeks");
        assert_eq!(date_difference_label(day(2024, 1, 2), day(2024, 1, 1)), "1 Day");
        assert_eq!(date_difference_label(day(2024, 1, 1), day(2024, 1, 1)), "0 Day");
    }
}
