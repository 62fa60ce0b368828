use serde::Deserialize;

/// What to do with a quantity cell that is neither blank nor a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberPolicy {
    /// Degrade to 0.0 (the historical behavior; indistinguishable from a
    /// true zero reading).
    #[default]
    Zero,
    /// Drop the whole row instead of emitting a zeroed quantity.
    Reject,
}

/// Normalize one quantity cell: strip all whitespace, rewrite the decimal
/// comma to a period, then parse the longest numeric prefix.
///
/// Returns `None` only for a non-blank cell with no numeric prefix at all;
/// blank cells are `Some(0.0)`. The prefix rule mirrors the exports this
/// reads: `"1.234,56"` becomes `"1.234.56"` and parses as `1.234` (no
/// thousands-separator stripping happens, deliberately).
pub fn try_normalize(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Some(0.0);
    }

    longest_numeric_prefix(&cleaned)
}

/// Normalize with the lenient policy: anything unparseable is 0.0.
pub fn normalize(raw: &str) -> f64 {
    match try_normalize(raw) {
        Some(v) => v,
        None => {
            metrics::counter!("number_parse_fallback_total").increment(1);
            0.0
        }
    }
}

fn longest_numeric_prefix(s: &str) -> Option<f64> {
    let mut boundaries: Vec<usize> = s.char_indices().map(|(i, _)| i).skip(1).collect();
    boundaries.push(s.len());

    for end in boundaries.into_iter().rev() {
        match s[..end].parse::<f64>() {
            // Rust accepts "inf"/"NaN"; the sheet never means those.
            Ok(v) if v.is_finite() => return Some(v),
            _ => {}
        }
    }
    None
}
