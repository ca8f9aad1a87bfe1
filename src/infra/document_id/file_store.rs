use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::docs::{DocsError, DocumentIdStore};

/// Remembers the destination document id in a plain text file.
pub struct FileDocumentIdStore {
    path: PathBuf,
}

impl FileDocumentIdStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DocumentIdStore for FileDocumentIdStore {
    async fn load(&self) -> Result<Option<String>, DocsError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DocsError::Store(e.to_string()))?;

        let id = text.trim();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(Some(id.to_string()))
    }

    async fn save(&self, document_id: &str) -> Result<(), DocsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DocsError::Store(e.to_string()))?;
        }

        fs::write(&self.path, document_id)
            .await
            .map_err(|e| DocsError::Store(e.to_string()))
    }
}
