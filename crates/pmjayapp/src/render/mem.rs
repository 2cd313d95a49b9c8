use super::DocumentRenderer;
use crate::error::{PmjayError, Result};
use crate::layout::Page;
use std::path::{Path, PathBuf};

/// A document the renderer was asked to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub output: PathBuf,
    pub pages: Vec<Page>,
}

/// Renderer that writes nothing and remembers what it was given.
#[derive(Debug, Default)]
pub struct MemRenderer {
    documents: Vec<RenderedDocument>,
    simulate_error: bool,
}

impl MemRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_error(&mut self, simulate: bool) {
        self.simulate_error = simulate;
    }

    pub fn documents(&self) -> &[RenderedDocument] {
        &self.documents
    }

    pub fn last(&self) -> Option<&RenderedDocument> {
        self.documents.last()
    }
}

impl DocumentRenderer for MemRenderer {
    fn render(&mut self, pages: &[Page], output: &Path) -> Result<()> {
        if self.simulate_error {
            return Err(PmjayError::Render("Simulated render error".to_string()));
        }
        self.documents.push(RenderedDocument {
            output: output.to_path_buf(),
            pages: pages.to_vec(),
        });
        Ok(())
    }
}
