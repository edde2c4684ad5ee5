use chrono::{DateTime, NaiveDate};

/// Open-ended experience entries carry this instead of an end date.
pub const PRESENT: &str = "Present";

/// Parses the date shapes the content files use: `YYYY-MM-DD`, `YYYY-MM`,
/// `YYYY`, or a full RFC 3339 timestamp. The calendar month written in the
/// input is the month shown; no timezone shift is applied.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// `"Jan 2023"`. `Present` is kept as-is and unparseable input is shown trimmed
/// rather than replaced with an error marker.
pub fn format_month(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(PRESENT) {
        return PRESENT.to_string();
    }
    match parse_month(trimmed) {
        Some(date) => date.format("%b %Y").to_string(),
        None => trimmed.to_string(),
    }
}

/// `"Jan 2023 - Mar 2024"`, or just the start month when the end is missing or blank.
pub fn format_date_range(start: &str, end: Option<&str>) -> String {
    let start = format_month(start);
    match end.map(str::trim).filter(|end| !end.is_empty()) {
        Some(end) => format!("{start} - {}", format_month(end)),
        None => start,
    }
}
