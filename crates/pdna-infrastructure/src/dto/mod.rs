//! Persistence DTOs for documents in the store.

mod metadata;
mod record;

pub use metadata::MetadataRecord;
pub use record::{RecordKind, RecordStatus, StoredRecord};
