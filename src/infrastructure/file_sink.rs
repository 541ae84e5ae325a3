use crate::domain::ports::RemittanceSink;
use crate::domain::record::{self, Record};
use crate::error::{RemessaError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes remittances to the local filesystem.
///
/// The whole file is rendered in memory and written to a temporary file next
/// to the destination, which is then renamed into place. Readers never see a
/// partially written remittance.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

impl RemittanceSink for FileSink {
    fn prepare(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        if fs::metadata(dir)?.permissions().readonly() {
            return Err(RemessaError::IoError(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("output directory {} is read-only", dir.display()),
            )));
        }
        debug!(dir = %dir.display(), "output directory ready");
        Ok(())
    }

    fn write(&self, dir: &Path, file_name: &str, records: &[Record]) -> Result<PathBuf> {
        let contents = record::render(records);
        let target = dir.join(file_name);

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| RemessaError::IoError(e.error))?;
        debug!(path = %target.display(), bytes = contents.len(), "remittance persisted");

        Ok(fs::canonicalize(&target)?)
    }
}
