//! JSON file store.
//!
//! Writes go to a temp file that is renamed over the target, so a crash
//! mid-save leaves the previous file intact.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::document::{ChildList, StoredChildren};
use crate::error::{Result, StoreError};
use crate::store::ChildStore;

/// Default file name of the child list.
pub const DEFAULT_STORE_FILE: &str = "kidchart.json";

/// Environment variable overriding the child list path.
pub const STORE_ENV_VAR: &str = "KIDCHART_STORE";

/// Child list stored as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ChildStore for JsonFileStore {
    fn load(&self) -> Result<ChildList> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no child list yet");
                return Ok(ChildList::default());
            }
            Err(e) => return Err(StoreError::io("read", &self.path, e)),
        };

        let stored: StoredChildren =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialization {
                path: self.path.clone(),
                source,
            })?;
        let list = ChildList::from(stored);
        info!(
            path = %self.path.display(),
            children = list.len(),
            "loaded child list"
        );
        Ok(list)
    }

    fn save(&mut self, list: &mut ChildList) -> Result<()> {
        list.touch();
        let bytes = serde_json::to_vec_pretty(list)
            .map_err(|source| StoreError::Serialization { source })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create directory", parent, e))?;
        }

        let temp_path = self.temp_path();
        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::io("create", &temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::io("write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync", &temp_path, e))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::io("rename", &temp_path, e))?;

        info!(
            path = %self.path.display(),
            children = list.len(),
            "saved child list"
        );
        Ok(())
    }
}
