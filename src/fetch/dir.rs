// src/fetch/dir.rs
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, SnapshotSource};
use crate::snapshot::Resource;

/// Reads snapshots straight from a local export directory.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SnapshotSource for DirSource {
    async fn fetch_bytes(&self, resource: Resource) -> Result<Vec<u8>, FetchError> {
        let path = self.dir.join(resource.file_name());
        tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })
    }

    fn name(&self) -> &'static str {
        "dir"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_a_transport_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let src = DirSource::new(tmp.path());
        let err = src.fetch_bytes(Resource::Articles).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("articles.json"), "{err}");
    }

    #[tokio::test]
    async fn reads_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("wordcloud.json"), br#"{"keywords":[]}"#).unwrap();
        let src = DirSource::new(tmp.path());
        let bytes = src.fetch_bytes(Resource::Wordcloud).await.unwrap();
        assert_eq!(bytes, br#"{"keywords":[]}"#);
    }
}
