pub mod published_sheet;

pub use published_sheet::{FetchError, PublishedSheetSource, SheetSource};
