//! Local filesystem storage implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{ArtistRecord, PathsConfig};
use crate::storage::CatalogStorage;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given data directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data. Pretty-printed; serde_json leaves non-ASCII
    /// characters unescaped, so artist names survive byte-for-byte.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn load_catalog(&self) -> Result<Vec<ArtistRecord>> {
        match self.read_json(&self.paths.catalog_file).await? {
            Some(records) => Ok(records),
            None => Err(AppError::config(format!(
                "Catalog not found: {}",
                self.path(&self.paths.catalog_file).display()
            ))),
        }
    }

    async fn write_catalog(&self, records: &[ArtistRecord]) -> Result<()> {
        self.write_json(&self.paths.output_file, records).await
    }

    async fn write_tag_list(&self, tags: &[String]) -> Result<()> {
        self.write_json(&self.paths.tags_file, tags).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempfile::TempDir;

    use super::*;
    use crate::models::NsfwLevel;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(tmp.path(), PathsConfig::default())
    }

    fn sample_record() -> ArtistRecord {
        ArtistRecord {
            artist_name: "藤ちょこ".to_string(),
            nsfw_level: NsfwLevel::Ecchi,
            art_style: "Digital".to_string(),
            kink_tags: BTreeSet::from(["femdom".to_string()]),
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_missing_catalog_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.load_catalog().await.is_err());
    }

    #[tokio::test]
    async fn test_catalog_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let records = vec![sample_record()];

        // The output file doubles as the next run's input in deployments
        // that rotate files, so it must parse as a catalog.
        storage.write_catalog(&records).await.unwrap();
        let bytes = storage
            .read_bytes(&PathsConfig::default().output_file)
            .await
            .unwrap()
            .unwrap();
        let loaded: Vec<ArtistRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(loaded, records);

        // Non-ASCII names are persisted unescaped
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("藤ちょこ"));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_tag_list(&["bdsm".to_string()]).await.unwrap();
        assert!(tmp.path().join("kink-tags.json").exists());
        assert!(!tmp.path().join("kink-tags.tmp").exists());
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_bytes("artists.json", b"{not json").await.unwrap();
        assert!(storage.load_catalog().await.is_err());
    }
}
