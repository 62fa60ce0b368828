use energy_domain::SheetSnapshot;
use time::OffsetDateTime;
use tracing::info;

use crate::parse::{self, ParseOptions};
use crate::sources::{FetchError, SheetSource};
use crate::transform::{SnapshotValidation, ValidationError};

/// Failure of one fetch-parse-validate cycle. Parsing itself never fails;
/// content problems degrade inside the parser per its tolerance policy.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Run one full ingestion cycle: fetch the published CSV, parse it into a
/// snapshot, validate the structure. Either the whole snapshot comes back
/// or an error does; there is no partial success.
pub async fn load_snapshot(
    source: &dyn SheetSource,
    opts: &ParseOptions,
) -> Result<SheetSnapshot, IngestError> {
    let raw = source.fetch_csv().await?;

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();
    let snapshot = parse::parse_snapshot(&raw, opts, today);

    SnapshotValidation.apply(&snapshot)?;

    info!(
        file_date = %snapshot.file_date,
        records = snapshot.data.len(),
        "parsed sheet snapshot"
    );
    Ok(snapshot)
}
