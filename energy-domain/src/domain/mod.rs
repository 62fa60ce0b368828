pub mod energy_record;
pub mod snapshot;

pub use energy_record::{EnergyRecord, Period};
pub use snapshot::SheetSnapshot;
