pub mod config;
pub mod export;
pub mod ingest;
pub mod metrics_server;
pub mod observability;
pub mod parse;
pub mod server;
pub mod sources;
pub mod transform;

pub use ingest::{load_snapshot, IngestError};
pub use parse::ParseOptions;
