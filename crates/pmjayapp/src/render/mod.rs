//! # Document Rendering
//!
//! Turns laid-out [`Page`]s into a printable document. Layout decides *what*
//! goes *where* (in millimetres from the top-left corner of an A4 sheet);
//! renderers only stamp it.
//!
//! - [`pdf::PdfRenderer`]: one A4 PDF page per [`Page`], optionally over a
//!   PNG template of the blank slip.
//! - [`mem::MemRenderer`]: keeps the pages it was given, for tests.

use crate::error::Result;
use crate::layout::Page;
use std::path::Path;

pub mod mem;
pub mod pdf;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// How far text is raised above the layout `y`, so it sits on the printed
/// line rather than through it.
pub const DEFAULT_BASELINE_OFFSET_MM: f32 = 0.5;

pub trait DocumentRenderer {
    /// Write `pages` as a single document at `output`.
    ///
    /// On error nothing is written at `output`.
    fn render(&mut self, pages: &[Page], output: &Path) -> Result<()>;
}

/// Convert a top-left based layout `y` to a bottom-left based baseline.
pub fn baseline_y(y: f32, baseline_offset: f32) -> f32 {
    A4_HEIGHT_MM - (y - baseline_offset)
}
