//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UIs.
//!
//! The facade owns the pieces a command needs (record store, layout engine,
//! renderer, printer) and dispatches to `commands::*::run`. It holds no
//! business logic and does no terminal I/O.
//!
//! ## Generic Over Backends
//!
//! `PmjayApi<B, R, P>` is generic over storage, rendering and printing:
//! - Production: `PmjayApi<FsBackend, PdfRenderer, CommandPrinter>`
//! - Testing: `PmjayApi<MemBackend, MemRenderer, MemPrinter>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::layout::LayoutEngine;
use crate::model::FormRecord;
use crate::print::{CommandPrinter, Printer};
use crate::render::pdf::PdfRenderer;
use crate::render::DocumentRenderer;
use crate::store::{RecordStore, StorageBackend};
use std::path::{Path, PathBuf};

pub struct PmjayApi<B: StorageBackend, R = PdfRenderer, P = CommandPrinter> {
    store: RecordStore<B>,
    engine: LayoutEngine,
    renderer: R,
    printer: P,
    output: PathBuf,
}

impl<B, R, P> PmjayApi<B, R, P>
where
    B: StorageBackend,
    R: DocumentRenderer,
    P: Printer,
{
    pub fn new(
        store: RecordStore<B>,
        engine: LayoutEngine,
        renderer: R,
        printer: P,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            engine,
            renderer,
            printer,
            output: output.into(),
        }
    }

    /// Default document path used when `generate` is given none.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Render `num_days` daily pages for `record` to `output`, or the
    /// configured output file.
    pub fn generate(
        &mut self,
        record: FormRecord,
        num_days: u32,
        output: Option<&Path>,
        save: bool,
    ) -> Result<CmdResult> {
        let output = output.map(Path::to_path_buf).unwrap_or_else(|| self.output.clone());
        commands::generate::run(
            &mut self.store,
            &self.engine,
            &mut self.renderer,
            record,
            num_days,
            &output,
            save,
        )
    }

    pub fn print_document(&self, document: &Path) -> Result<CmdResult> {
        commands::print::run(&self.printer, document)
    }

    pub fn save_record(&mut self, record: FormRecord) -> Result<CmdResult> {
        commands::save::run(&mut self.store, self.engine.layout(), record)
    }

    pub fn find_records(&mut self, query: &str) -> Result<CmdResult> {
        commands::search::run(&mut self.store, query)
    }

    pub fn list_records(&mut self) -> Result<CmdResult> {
        commands::list::run(&mut self.store)
    }
}
