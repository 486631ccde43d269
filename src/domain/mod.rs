pub mod identity;
pub mod note;
pub mod result;

pub use identity::derive_identifier;
pub use note::{Note, EXPORT_TIMESTAMP_FORMAT};
pub use result::{ProcessingResult, PublishMode, RunSummary, SkipReason};
