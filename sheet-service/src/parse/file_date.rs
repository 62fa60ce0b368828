use serde::Deserialize;
use time::{macros::format_description, Date};

use crate::parse::tokenizer::split_line;

/// Row and field index (both 0-based) of the cell holding the sheet's
/// publication date.
const FILE_DATE_ROW: usize = 4;
const FILE_DATE_FIELD: usize = 4;

/// Fallback chain when the fixed publication-date cell is missing or
/// malformed. The two historical call sites disagreed on this, so it is a
/// strategy parameter rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileDateFallback {
    /// Fall straight back to today's date.
    #[default]
    Today,
    /// Try the 4th field of the first valid data row first, then today.
    FirstRow,
}

/// `D{1,2}/D{1,2}/DDDD` — a calendar-shaped string, not a validated date.
/// Used both for the publication-date cell and for per-row date checks.
pub fn is_date_like(s: &str) -> bool {
    let mut parts = s.splitn(4, '/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y), None) => {
            is_digits(d, 1, 2) && is_digits(m, 1, 2) && is_digits(y, 4, 4)
        }
        _ => false,
    }
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

/// Extract the sheet's publication date from the fixed cell, falling back
/// per `strategy`. `today` is threaded in so callers (and tests) control
/// the clock.
pub fn extract_file_date(lines: &[&str], strategy: FileDateFallback, today: Date) -> String {
    if let Some(line) = lines.get(FILE_DATE_ROW) {
        let fields = split_line(line, ',');
        if let Some(cell) = fields.get(FILE_DATE_FIELD) {
            let cell = cell.trim();
            if is_date_like(cell) {
                return cell.to_string();
            }
        }
    }

    metrics::counter!("file_date_fallback_total").increment(1);

    if strategy == FileDateFallback::FirstRow {
        if let Some(d) = first_row_date(lines) {
            return d;
        }
    }

    format_today(today)
}

/// The 4th field of the first row whose leading field is date-like, if that
/// field is itself date-like.
fn first_row_date(lines: &[&str]) -> Option<String> {
    for line in lines {
        let fields = split_line(line, ',');
        if !is_date_like(fields[0].trim()) {
            continue;
        }
        return match fields.get(3).map(|f| f.trim()) {
            Some(cell) if is_date_like(cell) => Some(cell.to_string()),
            _ => None,
        };
    }
    None
}

pub fn format_today(today: Date) -> String {
    let format = format_description!("[day]/[month]/[year]");
    today
        .format(&format)
        .unwrap_or_else(|_| "01/01/1970".to_string())
}
