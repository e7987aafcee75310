use crate::domain::ports::Storage;
use crate::utils::error::{ImpactError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.base_path.join(path);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        let parent = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_path.clone());
        tokio::fs::create_dir_all(&parent).await?;

        // Readers never observe a partially written file. The temp file has a
        // unique name and is removed if it cannot be persisted.
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
            tmp.write_all(&data)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&full_path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| ImpactError::IoError(std::io::Error::other(e)))?
    }
}
