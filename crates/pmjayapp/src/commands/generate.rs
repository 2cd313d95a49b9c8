use crate::commands::{overflow_warnings, CmdMessage, CmdResult};
use crate::error::Result;
use crate::layout::LayoutEngine;
use crate::model::FormRecord;
use crate::render::DocumentRenderer;
use crate::store::{RecordStore, StorageBackend};
use std::path::Path;

/// Lay out `num_days` pages for `record` and render them to `output`.
///
/// The record is only remembered (when `save` is set) after the document
/// has been written, so a rejected or failed slip never reaches the store.
pub fn run<B: StorageBackend, R: DocumentRenderer>(
    store: &mut RecordStore<B>,
    engine: &LayoutEngine,
    renderer: &mut R,
    record: FormRecord,
    num_days: u32,
    output: &Path,
    save: bool,
) -> Result<CmdResult> {
    let pages = engine.render_pages(&record, num_days)?;
    renderer.render(&pages, output)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Rendered {} {} for {} to {}",
        pages.len(),
        if pages.len() == 1 { "page" } else { "pages" },
        record.name.trim(),
        output.display()
    )));
    for warning in overflow_warnings(engine.layout(), &record) {
        result.add_message(warning);
    }

    if save {
        store.upsert(record.clone())?;
        result.add_message(CmdMessage::info(format!(
            "Saved record for {}",
            record.name.trim()
        )));
    }

    result.pages = pages;
    result.document = Some(output.to_path_buf());
    result.records.push(record);
    Ok(result)
}
