use crate::domain::ports::RemittanceSink;
use crate::domain::record::{self, Record};
use crate::error::{RemessaError, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A thread-safe sink that keeps remittances in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// assembler and inspect the other.
#[derive(Default, Clone)]
pub struct InMemorySink {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    prepared: Arc<RwLock<Vec<PathBuf>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored at `path`, terminators included.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directories passed to [`RemittanceSink::prepare`], in call order.
    pub fn prepared(&self) -> Vec<PathBuf> {
        self.prepared
            .read()
            .map(|dirs| dirs.clone())
            .unwrap_or_default()
    }
}

fn poisoned() -> RemessaError {
    RemessaError::IoError(io::Error::other("in-memory sink lock poisoned"))
}

impl RemittanceSink for InMemorySink {
    fn prepare(&self, dir: &Path) -> Result<()> {
        let mut prepared = self.prepared.write().map_err(|_| poisoned())?;
        prepared.push(dir.to_path_buf());
        Ok(())
    }

    fn write(&self, dir: &Path, file_name: &str, records: &[Record]) -> Result<PathBuf> {
        let path = dir.join(file_name);
        let mut files = self.files.write().map_err(|_| poisoned())?;
        files.insert(path.clone(), record::render(records));
        Ok(path)
    }
}
