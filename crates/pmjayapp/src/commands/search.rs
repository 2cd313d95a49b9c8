use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Records whose name contains `query` (case and surrounding spaces ignored).
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, query: &str) -> Result<CmdResult> {
    let records = store.find_by_name(query)?;

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records match \"{}\"",
            query.trim()
        )));
    }
    Ok(result.with_records(records))
}
