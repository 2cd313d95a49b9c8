//! # Context Setup
//!
//! [`initialize`] resolves configuration and wires the production pieces
//! together: a CSV-backed [`RecordStore`], the default slip layout, a
//! [`PdfRenderer`] and a [`CommandPrinter`].
//!
//! ## Config Resolution
//!
//! Files are consulted in priority order (see [`crate::config`]):
//! 1. the explicit `--config` file, which must exist when given;
//! 2. `pmjay.toml` in the working directory;
//! 3. `pmjay.toml` in the user config directory. `PMJAY_CONFIG_DIR` overrides
//!    that directory, primarily so tests can isolate themselves.
//!
//! Relative paths in the resolved config are taken relative to the working
//! directory.

use crate::api::PmjayApi;
use crate::config::{PmjayConfig, CONFIG_FILE_NAME};
use crate::error::{PmjayError, Result};
use crate::layout::LayoutEngine;
use crate::print::CommandPrinter;
use crate::render::pdf::PdfRenderer;
use crate::store::fs_backend::FsBackend;
use crate::store::RecordStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct PmjayContext {
    pub api: PmjayApi<FsBackend>,
    pub config: PmjayConfig,
}

/// The user-level config directory, if one can be determined.
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("PMJAY_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "pmjay", "pmjay").map(|dirs| dirs.config_dir().to_path_buf())
        })
}

/// Config files to consult, highest priority first.
pub fn config_search_paths(cwd: &Path, config_override: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = config_override {
        paths.push(path.to_path_buf());
    }
    paths.push(cwd.join(CONFIG_FILE_NAME));
    if let Some(dir) = user_config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load configuration and build the API.
///
/// `data_override` replaces the configured `data_file`.
pub fn initialize(
    cwd: &Path,
    config_override: Option<PathBuf>,
    data_override: Option<PathBuf>,
) -> Result<PmjayContext> {
    if let Some(path) = &config_override {
        if !path.is_file() {
            return Err(PmjayError::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
    }

    let search_paths = config_search_paths(cwd, config_override.as_deref());
    tracing::debug!(paths = ?search_paths, "loading config");

    let mut config = PmjayConfig::load(&search_paths)?;
    if let Some(data_file) = data_override {
        config.data_file = data_file;
    }
    let config = config.resolve_paths(cwd);

    let store = RecordStore::with_backend(FsBackend::new(&config.data_file))
        .with_capacity(config.capacity);
    let api = PmjayApi::new(
        store,
        LayoutEngine::default(),
        PdfRenderer::new(config.render_settings()),
        CommandPrinter::new(config.print_command.clone()),
        config.output_file.clone(),
    );

    Ok(PmjayContext { api, config })
}
