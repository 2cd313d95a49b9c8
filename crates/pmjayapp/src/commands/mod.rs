//! # Command Layer
//!
//! Each command lives in its own submodule as a plain `run` function over the
//! store, the layout engine, a renderer or a printer.
//!
//! Commands:
//! - return structured [`CmdResult`] values, never strings to print;
//! - do no terminal I/O and parse no arguments;
//! - leave exit codes to the caller.
//!
//! The UI layer decides how to present the records, pages and messages.
//!
//! ## Testing Strategy
//!
//! Command tests run against [`MemBackend`](crate::store::mem_backend::MemBackend),
//! [`MemRenderer`](crate::render::mem::MemRenderer) and
//! [`MemPrinter`](crate::print::MemPrinter), so no files are touched.
//!
//! ## Command Modules
//!
//! - [`generate`]: lay out and render a stay, optionally remembering the record
//! - [`print`]: send a rendered document to the printer
//! - [`save`]: remember a record without rendering
//! - [`search`]: find remembered records by name
//! - [`list`]: all remembered records

use crate::layout::{FieldLayout, Page};
use crate::model::FormRecord;
use serde::Serialize;
use std::path::PathBuf;

pub mod generate;
pub mod list;
pub mod print;
pub mod save;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Records saved, found or listed by the command.
    pub records: Vec<FormRecord>,
    /// Pages laid out by `generate`.
    pub pages: Vec<Page>,
    /// Document written or printed.
    pub document: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<FormRecord>) -> Self {
        self.records = records;
        self
    }
}

/// One warning per text field of `record` that is longer than the slip can
/// hold under `layout`.
pub(crate) fn overflow_warnings(layout: &FieldLayout, record: &FormRecord) -> Vec<CmdMessage> {
    [
        ("Name", record.name.as_str(), layout.name.max_chars),
        ("Address", record.address.as_str(), layout.address_capacity()),
        ("Diagnosis", record.diagnosis.as_str(), layout.diagnosis.max_chars),
    ]
    .into_iter()
    .filter_map(|(label, value, limit)| {
        let len = value.chars().count();
        (len > limit).then(|| {
            CmdMessage::warning(format!(
                "{label} is {len} characters; only the first {limit} fit on the slip"
            ))
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Field;
    use chrono::NaiveDate;

    fn record(name: &str, address: &str, diagnosis: &str) -> FormRecord {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        FormRecord::new(name, address, diagnosis, date, date, date)
    }

    #[test]
    fn test_no_warnings_within_budgets() {
        let layout = FieldLayout::default();
        let fits = record(&"n".repeat(38), &"a".repeat(133), &"d".repeat(70));
        assert!(overflow_warnings(&layout, &fits).is_empty());
    }

    #[test]
    fn test_warns_for_each_overlong_field() {
        let layout = FieldLayout::default();
        let long = record(&"n".repeat(39), &"a".repeat(200), &"d".repeat(71));
        let warnings = overflow_warnings(&layout, &long);

        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.level == MessageLevel::Warning));
        assert_eq!(
            warnings[1].content,
            "Address is 200 characters; only the first 133 fit on the slip"
        );
    }

    #[test]
    fn test_budgets_count_characters_not_bytes() {
        let layout = FieldLayout::default().with_max_chars(Field::Name, 4);
        assert!(overflow_warnings(&layout, &record("अमित", "", "")).is_empty());

        let warnings = overflow_warnings(&layout, &record("अमिता", "", ""));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].content.starts_with("Name is 5 characters"));
    }
}
