use super::StorageBackend;
use crate::core::{NamerError, NamerResult};
use std::path::Path;

/// ローカルファイルシステム用のストレージバックエンド
#[derive(Clone, Debug)]
pub struct LocalStorageBackend;

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for LocalStorageBackend {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> NamerResult<()> {
        std::fs::rename(from, to).map_err(|e| NamerError::rename(from, to, e))?;
        tracing::debug!(from = %from.display(), to = %to.display(), "renamed");
        Ok(())
    }
}
