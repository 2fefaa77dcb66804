//! Filesystem-backed media store.
//!
//! Artifacts are written under `{root}/{namespace}/{client_id}.{ext}` and
//! exposed to clients as `{public_base_url}/media/{namespace}/{file}`.
//! Writing the same artifact kind for the same client overwrites the
//! previous file, so regenerated artifacts keep a stable URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use cardhub_core::config::media::MediaConfig;
use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;

use crate::fetch::{fetch_with_retry, RetryPolicy};
use crate::store::{ArtifactKind, MediaStore};

/// Local-disk [`MediaStore`] implementation.
#[derive(Debug)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_base_url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl LocalMediaStore {
    pub fn new(config: &MediaConfig, public_base_url: &str) -> Self {
        Self {
            root: PathBuf::from(&config.root_path),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            retry: RetryPolicy {
                attempts: config.fetch_attempts,
                timeout: std::time::Duration::from_secs(config.fetch_timeout_seconds),
                backoff_base: std::time::Duration::from_millis(config.fetch_backoff_base_ms),
            },
        }
    }

    /// Root directory holding all artifact namespaces.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, kind: ArtifactKind, client_id: Uuid) -> PathBuf {
        self.root
            .join(kind.namespace())
            .join(format!("{}.{}", client_id, kind.extension()))
    }

    fn public_url(&self, kind: ArtifactKind, client_id: Uuid) -> String {
        format!(
            "{}/media/{}/{}.{}",
            self.public_base_url,
            kind.namespace(),
            client_id,
            kind.extension()
        )
    }

    /// Map a URL under our own public base back to a local path, if any.
    fn local_path_for(&self, url: &str) -> Option<PathBuf> {
        let prefix = format!("{}/media/", self.public_base_url);
        let relative = url.strip_prefix(&prefix)?;
        // Reject traversal out of the media root.
        if relative.split('/').any(|part| part == ".." || part.is_empty()) {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, kind: ArtifactKind, client_id: Uuid, data: Bytes) -> AppResult<String> {
        let path = self.file_path(kind, client_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create media directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        tokio::fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write artifact: {}", path.display()),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = data.len(), "Stored artifact");
        Ok(self.public_url(kind, client_id))
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        if let Some(path) = self.local_path_for(url) {
            let data = tokio::fs::read(&path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read artifact: {}", path.display()),
                    e,
                )
            })?;
            return Ok(Bytes::from(data));
        }

        fetch_with_retry(&self.http, url, &self.retry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> LocalMediaStore {
        let config = MediaConfig {
            root_path: dir.to_string_lossy().into_owned(),
            ..MediaConfig::default()
        };
        LocalMediaStore::new(&config, "http://localhost:8080/")
    }

    #[tokio::test]
    async fn upload_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let id = Uuid::new_v4();

        let url = store
            .upload(ArtifactKind::Pdf, id, Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(url, format!("http://localhost:8080/media/pdfs/{id}.pdf"));

        let data = store.fetch(&url).await.unwrap();
        assert_eq!(&data[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn upload_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let id = Uuid::new_v4();

        let first = store
            .upload(ArtifactKind::VcardFile, id, Bytes::from_static(b"old"))
            .await
            .unwrap();
        let second = store
            .upload(ArtifactKind::VcardFile, id, Bytes::from_static(b"new"))
            .await
            .unwrap();
        assert_eq!(first, second);

        let data = store.fetch(&second).await.unwrap();
        assert_eq!(&data[..], b"new");
    }

    #[tokio::test]
    async fn traversal_urls_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store
            .local_path_for("http://localhost:8080/media/../secrets.txt")
            .is_none());
        assert!(store
            .local_path_for("http://localhost:8080/media/pdfs//x.pdf")
            .is_none());
    }

    #[tokio::test]
    async fn missing_local_artifact_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let err = store
            .fetch("http://localhost:8080/media/photos/missing.jpg")
            .await
            .expect_err("must fail");
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
