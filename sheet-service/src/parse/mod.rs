pub mod file_date;
pub mod number;
pub mod tokenizer;

pub use file_date::FileDateFallback;
pub use number::NumberPolicy;

use energy_domain::{EnergyRecord, SheetSnapshot};
use time::Date;

use file_date::{extract_file_date, is_date_like};
use tokenizer::split_line;

const DELIMITER: char = ',';
/// date + two quantity fields; a 4th field is accepted and ignored.
const MIN_FIELDS: usize = 3;

/// Knobs for one parse run. The column mapping is deliberately
/// configuration rather than a hard-coded position: the source sheets have
/// swapped the gas/power columns before.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// 0-based field index mapped to `power` (the date is field 0).
    pub power_column: usize,
    /// 0-based field index mapped to `gas`.
    pub gas_column: usize,
    pub file_date_fallback: FileDateFallback,
    pub on_parse_failure: NumberPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            power_column: 1,
            gas_column: 2,
            file_date_fallback: FileDateFallback::default(),
            on_parse_failure: NumberPolicy::default(),
        }
    }
}

/// Parse the raw CSV text of a published sheet into a snapshot.
///
/// Every line is checked on its own merits: a row is kept only when it has
/// at least three fields and a date-like leading field. Header lines,
/// blank lines and short rows are dropped silently, never errored. Output
/// order is source order.
pub fn parse_snapshot(raw: &str, opts: &ParseOptions, today: Date) -> SheetSnapshot {
    let lines: Vec<&str> = raw.lines().collect();

    let file_date = extract_file_date(&lines, opts.file_date_fallback, today);

    let mut data = Vec::new();
    for line in &lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_line(line, DELIMITER);
        if fields.len() < MIN_FIELDS {
            metrics::counter!("rows_dropped_total", "reason" => "short").increment(1);
            continue;
        }

        let date = fields[0].trim();
        if date.is_empty() || !is_date_like(date) {
            metrics::counter!("rows_dropped_total", "reason" => "date").increment(1);
            continue;
        }

        let Some((gas, power)) = quantities(&fields, opts) else {
            metrics::counter!("rows_dropped_total", "reason" => "quantity").increment(1);
            continue;
        };

        data.push(EnergyRecord {
            date: date.to_string(),
            gas,
            power,
        });
    }

    SheetSnapshot { file_date, data }
}

fn quantities(fields: &[String], opts: &ParseOptions) -> Option<(f64, f64)> {
    let cell = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");

    match opts.on_parse_failure {
        NumberPolicy::Zero => Some((
            number::normalize(cell(opts.gas_column)),
            number::normalize(cell(opts.power_column)),
        )),
        NumberPolicy::Reject => Some((
            number::try_normalize(cell(opts.gas_column))?,
            number::try_normalize(cell(opts.power_column))?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 07);

    fn parse(raw: &str) -> SheetSnapshot {
        parse_snapshot(raw, &ParseOptions::default(), TODAY)
    }

    #[test]
    fn end_to_end_snapshot() {
        let raw = "\
titolo,,,
,,,
,,,
,,,
,,,,\"15/03/2024\",,
Data,Power,Gas
01/01/2024,10,5
,,,";

        let snap = parse(raw);
        assert_eq!(snap.file_date, "15/03/2024");
        assert_eq!(
            snap.data,
            vec![EnergyRecord {
                date: "01/01/2024".to_string(),
                gas: 5.0,
                power: 10.0,
            }]
        );
    }

    #[test]
    fn rows_with_empty_date_are_dropped() {
        let snap = parse("\n\n\n\n,,,,\n ,1,2\n01/01/2024,1,2\n");
        assert_eq!(snap.data.len(), 1);
        assert_eq!(snap.data[0].date, "01/01/2024");
    }

    #[test]
    fn short_rows_are_dropped() {
        let snap = parse("\n\n\n\n,,,,\n01/01/2024,1\n02/01/2024,1,2\n");
        assert_eq!(snap.data.len(), 1);
        assert_eq!(snap.data[0].date, "02/01/2024");
    }

    #[test]
    fn header_rows_anywhere_are_skipped_by_date_check() {
        let snap = parse("\n\n\n\n,,,,\n01/01/2024,1,2\nData,Power,Gas\n02/01/2024,3,4\n");
        let dates: Vec<&str> = snap.data.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["01/01/2024", "02/01/2024"]);
    }

    #[test]
    fn source_order_is_preserved() {
        let snap = parse("\n\n\n\n,,,,\n03/01/2024,1,2\n01/01/2024,3,4\n02/01/2024,5,6\n");
        let dates: Vec<&str> = snap.data.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["03/01/2024", "01/01/2024", "02/01/2024"]);
    }

    #[test]
    fn decimal_commas_and_blanks_in_quantities() {
        let snap = parse("\n\n\n\n,,,,\n01/01/2024,\"12,5\",\n");
        assert_eq!(snap.data[0].power, 12.5);
        assert_eq!(snap.data[0].gas, 0.0);
    }

    #[test]
    fn fourth_field_is_ignored() {
        let snap = parse("\n\n\n\n,,,,\n01/01/2024,1,2,extra\n");
        assert_eq!(
            snap.data,
            vec![EnergyRecord {
                date: "01/01/2024".to_string(),
                gas: 2.0,
                power: 1.0,
            }]
        );
    }

    #[test]
    fn swapped_column_mapping_is_honored() {
        let opts = ParseOptions {
            power_column: 2,
            gas_column: 1,
            ..ParseOptions::default()
        };
        let snap = parse_snapshot("\n\n\n\n,,,,\n01/01/2024,10,5\n", &opts, TODAY);
        assert_eq!(snap.data[0].gas, 10.0);
        assert_eq!(snap.data[0].power, 5.0);
    }

    #[test]
    fn reject_policy_drops_rows_with_garbage_quantities() {
        let opts = ParseOptions {
            on_parse_failure: NumberPolicy::Reject,
            ..ParseOptions::default()
        };
        let snap = parse_snapshot(
            "\n\n\n\n,,,,\n01/01/2024,n/a,2\n02/01/2024,1,2\n",
            &opts,
            TODAY,
        );
        assert_eq!(snap.data.len(), 1);
        assert_eq!(snap.data[0].date, "02/01/2024");
    }

    #[test]
    fn zero_policy_keeps_rows_with_garbage_quantities() {
        let snap = parse("\n\n\n\n,,,,\n01/01/2024,n/a,2\n");
        assert_eq!(snap.data[0].power, 0.0);
        assert_eq!(snap.data[0].gas, 2.0);
    }

    #[test]
    fn missing_file_date_cell_uses_today() {
        let snap = parse("01/01/2024,1,2\n");
        assert_eq!(snap.file_date, "07/06/2024");
        assert_eq!(snap.data.len(), 1);
    }
}
