use serde::{Deserialize, Serialize};

use crate::domain::EnergyRecord;

/// The result of one fetch-and-parse cycle of the published sheet.
///
/// `file_date` is the sheet's stated publication date ("as of"), distinct
/// from any individual record's date. `data` keeps source row order; any
/// sorting is a display concern downstream. Snapshots are built fresh per
/// request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    #[serde(rename = "fileDate")]
    pub file_date: String,
    pub data: Vec<EnergyRecord>,
}
