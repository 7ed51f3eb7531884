//! Report data model.
//!
//! These are the values handed back to callers of an extraction. They
//! serialize with serde so an exporter can write them out as JSON.

mod report;
mod repository;
mod user;

pub use report::{ExtractionReport, Section, SectionError};
pub use repository::RepositoryRecord;
pub use user::{UserDetails, UserRecord};
