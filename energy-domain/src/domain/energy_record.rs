use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

/// One observation row from the published sheet.
///
/// `date` keeps the literal `DD/MM/YYYY` string from the source so that
/// serializing a snapshot back to JSON round-trips the value exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub date: String,
    pub gas: f64,
    pub power: f64,
}

/// Whether an observation belongs to a finalized (consolidato) period or
/// is a projection for the current/future months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Consolidated,
    Forecast,
}

impl EnergyRecord {
    /// Classify this record relative to `today`: dates strictly before the
    /// current month are `Consolidated`, the rest are `Forecast`. Returns
    /// `None` when the date string is not a parseable calendar date.
    pub fn period(&self, today: Date) -> Option<Period> {
        let format = format_description!("[day]/[month]/[year]");
        let date = Date::parse(self.date.trim(), &format).ok()?;

        let before_current_month = (date.year(), u8::from(date.month()))
            < (today.year(), u8::from(today.month()));

        Some(if before_current_month {
            Period::Consolidated
        } else {
            Period::Forecast
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn record(d: &str) -> EnergyRecord {
        EnergyRecord {
            date: d.to_string(),
            gas: 0.0,
            power: 0.0,
        }
    }

    #[test]
    fn previous_month_is_consolidated() {
        let r = record("15/02/2024");
        assert_eq!(r.period(date!(2024 - 03 - 10)), Some(Period::Consolidated));
    }

    #[test]
    fn current_month_is_forecast() {
        let r = record("01/03/2024");
        assert_eq!(r.period(date!(2024 - 03 - 10)), Some(Period::Forecast));
    }

    #[test]
    fn later_year_is_forecast() {
        let r = record("01/01/2025");
        assert_eq!(r.period(date!(2024 - 03 - 10)), Some(Period::Forecast));
    }

    #[test]
    fn unparseable_date_is_unclassifiable() {
        let r = record("not a date");
        assert_eq!(r.period(date!(2024 - 03 - 10)), None);
    }
}
