pub mod domain;

pub use domain::{EnergyRecord, Period, SheetSnapshot};
