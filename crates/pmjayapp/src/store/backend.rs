use crate::error::StoreResult;
use crate::model::FormRecord;
use std::path::PathBuf;

/// Raw persistence for the record store.
///
/// This trait handles the "how" of storage (CSV file vs memory), while
/// [`RecordStore`](super::RecordStore) handles the "what" (dedup, capacity,
/// ordering, lazy reload).
pub trait StorageBackend {
    /// Load every persisted record, in file order.
    /// Returns an empty list when nothing has been persisted yet.
    fn load(&self) -> StoreResult<Vec<FormRecord>>;

    /// Replace the persisted records with `records`.
    fn save(&self, records: &[FormRecord]) -> StoreResult<()>;

    /// Where the records live. For FsBackend, the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
