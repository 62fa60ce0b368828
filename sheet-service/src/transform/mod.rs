use energy_domain::SheetSnapshot;

use crate::parse::file_date::is_date_like;

/// Structural failure of an assembled snapshot. Distinct from the silent
/// content degradation in the parser: hitting one of these means the
/// upstream sheet format changed, not that a cell was noisy.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("file date '{0}' is not a DD/MM/YYYY date")]
    FileDate(String),
    #[error("record {0}: empty date")]
    EmptyDate(usize),
    #[error("record {index}: {field} is not a finite number")]
    NonFiniteQuantity { index: usize, field: &'static str },
}

/// Pure validation of a `SheetSnapshot`.
///
/// Rules:
/// - the file date must be calendar-shaped (`D{1,2}/D{1,2}/DDDD`);
/// - every record must carry a non-empty, calendar-shaped date;
/// - gas and power must be finite.
pub fn validate_snapshot(snap: &SheetSnapshot) -> Result<(), ValidationError> {
    if !is_date_like(snap.file_date.trim()) {
        return Err(ValidationError::FileDate(snap.file_date.clone()));
    }

    for (index, record) in snap.data.iter().enumerate() {
        if record.date.trim().is_empty() || !is_date_like(record.date.trim()) {
            return Err(ValidationError::EmptyDate(index));
        }
        if !record.gas.is_finite() {
            return Err(ValidationError::NonFiniteQuantity { index, field: "gas" });
        }
        if !record.power.is_finite() {
            return Err(ValidationError::NonFiniteQuantity { index, field: "power" });
        }
    }

    Ok(())
}

#[derive(Clone, Default)]
pub struct SnapshotValidation;

impl SnapshotValidation {
    pub fn apply(&self, snap: &SheetSnapshot) -> Result<(), ValidationError> {
        match validate_snapshot(snap) {
            Ok(()) => Ok(()),
            Err(e) => {
                metrics::counter!("snapshot_validation_failures_total").increment(1);
                Err(e)
            }
        }
    }
}
