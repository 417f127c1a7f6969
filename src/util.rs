// Utility helpers for parsing, rounding and number formatting.
//
// The RO export is hand-maintained, so the parsers here are forgiving and
// return `None` instead of failing on blank or malformed cells.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a numeric CSV cell.
///
/// - Trims whitespace.
/// - Rejects values containing letters (e.g. `N/A`).
/// - Strips thousands separators and a leading `$`.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace([',', '$'], "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // Dates are expected in `YYYY-MM-DD` format.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Trim a text cell, substituting `fallback` when it is missing or blank.
pub fn clean_label(s: Option<String>, fallback: &str) -> String {
    match s.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A value counts as present for ratio purposes only if it is non-zero.
pub fn is_truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Sum the present values, skipping missing cells, rounded to cents.
pub fn sum_present<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    round2(values.into_iter().flatten().sum())
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals with locale thousands separators (`1,234,567.89`).
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        // Beyond u128; print the digits unseparated rather than lose them.
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // `-0` is not a useful thing to print.
    if n.is_sign_negative() && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
