//! Media store trait for pluggable artifact storage backends.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use cardhub_core::result::AppResult;

/// The four artifact kinds produced by the system, each namespaced into
/// its own bucket prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Uploaded profile photo.
    Photo,
    /// Rendered PDF card.
    Pdf,
    /// vCard text file.
    VcardFile,
    /// QR code image.
    QrCode,
}

impl ArtifactKind {
    /// Bucket namespace prefix for this kind.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::Pdf => "pdfs",
            Self::VcardFile => "vcards",
            Self::QrCode => "qr",
        }
    }

    /// File extension for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Photo => "jpg",
            Self::Pdf => "pdf",
            Self::VcardFile => "vcf",
            Self::QrCode => "png",
        }
    }

    /// MIME type served for this kind.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Photo => "image/jpeg",
            Self::Pdf => "application/pdf",
            Self::VcardFile => "text/vcard",
            Self::QrCode => "image/png",
        }
    }
}

/// Trait for artifact storage backends.
///
/// An upload failure is an [`ErrorKind::Storage`] error and callers must
/// treat it as abort-the-operation, never as partial success.
///
/// [`ErrorKind::Storage`]: cardhub_core::error::ErrorKind::Storage
#[async_trait]
pub trait MediaStore: Send + Sync + std::fmt::Debug + 'static {
    /// Upload an artifact and return its public URL.
    async fn upload(&self, kind: ArtifactKind, client_id: Uuid, data: Bytes) -> AppResult<String>;

    /// Fetch a previously uploaded artifact back by its public URL.
    async fn fetch(&self, url: &str) -> AppResult<Bytes>;
}
