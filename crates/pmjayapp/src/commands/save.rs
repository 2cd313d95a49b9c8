use crate::commands::{overflow_warnings, CmdMessage, CmdResult};
use crate::error::Result;
use crate::layout::FieldLayout;
use crate::model::FormRecord;
use crate::store::{RecordStore, StorageBackend};

/// Remember `record`, replacing any earlier record for the same patient.
///
/// The record is stored in full; fields too long for `layout` only draw a
/// warning.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    layout: &FieldLayout,
    record: FormRecord,
) -> Result<CmdResult> {
    let replaced = store.contains_name(&record.name)?;
    store.upsert(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(if replaced {
        format!("Updated record for {}", record.name.trim())
    } else {
        format!("Saved record for {}", record.name.trim())
    }));
    for warning in overflow_warnings(layout, &record) {
        result.add_message(warning);
    }
    Ok(result.with_records(vec![record]))
}
