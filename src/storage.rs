use std::path::PathBuf;

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;

/// Destination for accepted uploads. Filenames are expected to be already
/// sanitized; saving an existing name overwrites it.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn save(&self, name: &str, body: Bytes) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl UploadStore for DiskStore {
    async fn save(&self, name: &str, body: Bytes) -> anyhow::Result<()> {
        let path = self.root.join(name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_bytes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());

        store
            .save("avatar.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        let saved = std::fs::read(dir.path().join("avatar.png")).unwrap();
        assert_eq!(saved, b"png-bytes");
    }

    #[tokio::test]
    async fn second_save_overwrites_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());

        store
            .save("pic.jpg", Bytes::from_static(b"first"))
            .await
            .unwrap();
        store
            .save("pic.jpg", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let saved = std::fs::read(dir.path().join("pic.jpg")).unwrap();
        assert_eq!(saved, b"second");
    }

    #[tokio::test]
    async fn save_into_missing_root_errors() {
        let store = DiskStore::new("/definitely/not/a/dir");
        let err = store
            .save("x.png", Bytes::from_static(b"data"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("x.png"));
    }
}
