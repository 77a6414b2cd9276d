use crate::domain::ports::DefinitionSource;
use crate::utils::error::{CatalogError, Result};
use std::path::{Path, PathBuf};

pub const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Definition files in a single directory (not recursive).
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    base_path: PathBuf,
}

impl LocalDirectory {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CatalogError {
        CatalogError::IoError {
            path: self.base_path.display().to_string(),
            source,
        }
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DEFINITION_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

impl DefinitionSource for LocalDirectory {
    fn location(&self) -> String {
        self.base_path.display().to_string()
    }

    async fn list_definitions(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.base_path)
            .await
            .map_err(|e| self.io_error(e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| self.io_error(e))? {
            let path = entry.path();
            if !is_definition_file(&path) {
                continue;
            }
            // follows symlinks, so a linked file still counts
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|e| self.io_error(e))?;
            if !metadata.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_definition(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        tokio::fs::read(&full_path)
            .await
            .map_err(|source| CatalogError::IoError {
                path: full_path.display().to_string(),
                source,
            })
    }
}
