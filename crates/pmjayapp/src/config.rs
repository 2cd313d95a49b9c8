//! # Configuration
//!
//! Settings are declared with [`confique`] and loaded from TOML files and
//! environment variables.
//!
//! ## Sources
//!
//! Resolved in priority order:
//! 1. **Environment variables**: `PMJAY_DATA_FILE`, `PMJAY_OUTPUT_FILE`, `PMJAY_PRINT_COMMAND`, ...
//! 2. **Explicit file**: `pmjay --config <path>`.
//! 3. **Working directory**: `./pmjay.toml`.
//! 4. **User config**: `pmjay.toml` in the OS config directory (via `directories`).
//! 5. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `data.csv` | CSV file holding the recent records |
//! | `output_file` | `output.pdf` | Where `generate` writes the slip |
//! | `template_file` | none | PNG of the blank slip, drawn under the text |
//! | `font_file` | none | TrueType font; builtin Courier when unset |
//! | `font_size` | `11.0` | Point size of all text |
//! | `baseline_offset_mm` | `0.5` | Lift applied to every field's `y` |
//! | `print_command` | `PDFtoPrinter.exe` | Program run with the PDF path to print it |
//! | `capacity` | `10` | Number of records kept |

use crate::error::{PmjayError, Result};
use crate::render::pdf::RenderSettings;
use crate::render::DEFAULT_BASELINE_OFFSET_MM;
use crate::store::DEFAULT_CAPACITY;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pmjay.toml";

/// Configuration for pmjay, stored in `pmjay.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PmjayConfig {
    /// CSV file holding the most recent records.
    #[config(env = "PMJAY_DATA_FILE", default = "data.csv")]
    pub data_file: PathBuf,

    /// Where generated slips are written.
    #[config(env = "PMJAY_OUTPUT_FILE", default = "output.pdf")]
    pub output_file: PathBuf,

    /// PNG image of the blank slip. When absent, pages are blank.
    #[config(env = "PMJAY_TEMPLATE_FILE")]
    pub template_file: Option<PathBuf>,

    /// TrueType font used for every field.
    #[config(env = "PMJAY_FONT_FILE")]
    pub font_file: Option<PathBuf>,

    #[config(default = 11.0)]
    pub font_size: f32,

    #[config(default = 0.5)]
    pub baseline_offset_mm: f32,

    /// Program invoked as `<print_command> <pdf>` by `generate --print`.
    #[config(env = "PMJAY_PRINT_COMMAND", default = "PDFtoPrinter.exe")]
    pub print_command: String,

    /// Maximum number of stored records.
    #[config(default = 10)]
    pub capacity: usize,
}

impl Default for PmjayConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.csv"),
            output_file: PathBuf::from("output.pdf"),
            template_file: None,
            font_file: None,
            font_size: 11.0,
            baseline_offset_mm: DEFAULT_BASELINE_OFFSET_MM,
            print_command: "PDFtoPrinter.exe".to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl PmjayConfig {
    /// Load from the environment and then `files`, highest priority first.
    /// Files that do not exist are skipped.
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = PmjayConfig::builder().env();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        builder
            .load()
            .map_err(|e| PmjayError::Config(e.to_string()))
    }

    /// Relative paths in the config are taken relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.data_file = resolve(base, self.data_file);
        self.output_file = resolve(base, self.output_file);
        self.template_file = self.template_file.map(|p| resolve(base, p));
        self.font_file = self.font_file.map(|p| resolve(base, p));
        self
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            template: self.template_file.clone(),
            font: self.font_file.clone(),
            font_size: self.font_size,
            baseline_offset_mm: self.baseline_offset_mm,
            ..Default::default()
        }
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
