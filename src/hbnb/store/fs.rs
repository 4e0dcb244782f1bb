use super::{Backend, Document};
use crate::error::{HbnbError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_FILE_NAME: &str = "hbnb.json";

/// Stores the registry document in a single JSON file.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(HbnbError::Io)?;
            }
        }
        Ok(())
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl Backend for FileBackend {
    fn load(&self) -> Result<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(HbnbError::Io)?;
        let document: Document =
            serde_json::from_str(&content).map_err(HbnbError::Serialization)?;
        Ok(Some(document))
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_string(document).map_err(HbnbError::Serialization)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_FILE_NAME);
        let tmp_file = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(HbnbError::Io)?;
        fs::rename(&tmp_file, &self.path).map_err(HbnbError::Io)?;
        Ok(())
    }
}
