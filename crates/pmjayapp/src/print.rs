//! Handing a finished document to the operating system's printer.
//!
//! Printing is a separate step from rendering: a print failure is reported
//! but never touches the rendered file.

use crate::error::{PmjayError, Result};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Printer {
    fn print(&self, document: &Path) -> Result<()>;
}

/// Runs `<program> <document>` and waits for it.
#[derive(Debug, Clone)]
pub struct CommandPrinter {
    program: String,
}

impl CommandPrinter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Printer for CommandPrinter {
    fn print(&self, document: &Path) -> Result<()> {
        tracing::debug!(program = %self.program, document = %document.display(), "printing");
        let status = Command::new(&self.program)
            .arg(document)
            .status()
            .map_err(|e| PmjayError::Print(format!("failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(PmjayError::Print(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Printer that only records what it was asked to print.
#[derive(Debug, Default)]
pub struct MemPrinter {
    printed: RefCell<Vec<PathBuf>>,
    simulate_error: Cell<bool>,
}

impl MemPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_error(&self, simulate: bool) {
        self.simulate_error.set(simulate);
    }

    pub fn printed(&self) -> Vec<PathBuf> {
        self.printed.borrow().clone()
    }
}

impl Printer for MemPrinter {
    fn print(&self, document: &Path) -> Result<()> {
        if self.simulate_error.get() {
            return Err(PmjayError::Print("Simulated print error".to_string()));
        }
        self.printed.borrow_mut().push(document.to_path_buf());
        Ok(())
    }
}
