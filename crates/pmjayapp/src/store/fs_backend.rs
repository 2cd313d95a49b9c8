use super::backend::StorageBackend;
use super::codec;
use crate::error::{StoreError, StoreResult};
use crate::model::FormRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Records persisted as a CSV file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_tmp(&self, tmp_path: &Path, records: &[FormRecord]) -> StoreResult<()> {
        let mut writer = BufWriter::new(File::create(tmp_path)?);
        codec::write_records(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    fn ensure_parent_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> StoreResult<Vec<FormRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no record file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        codec::read_records(BufReader::new(file))
    }

    fn save(&self, records: &[FormRecord]) -> StoreResult<()> {
        self.ensure_parent_dir()?;

        // Atomic write: a failed save never leaves a half-written record file.
        let tmp_path = self.tmp_path();
        let result = self
            .write_tmp(&tmp_path, records)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(StoreError::from));

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "records saved");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
