use std::fs;
use std::path::{Path, PathBuf};

use super::StorageMedium;
use crate::error::{Result, ScriptError};

/// File-backed key-value medium: each key is one file under a root
/// directory. This is the durable stand-in for the browser's local storage;
/// keys are the fixed table names, which are filesystem-safe by
/// construction.
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| ScriptError::Store(format!("cannot create {}: {}", self.root.display(), e)))?;
        }
        Ok(())
    }
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ScriptError::Store(format!("cannot read {}: {}", path.display(), e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        let path = self.key_path(key);
        fs::write(&path, value)
            .map_err(|e| ScriptError::Store(format!("cannot write {}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| ScriptError::Store(format!("cannot remove {}: {}", path.display(), e)))?;
        }
        Ok(())
    }
}
