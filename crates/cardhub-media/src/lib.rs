//! # cardhub-media
//!
//! The media pipeline: a [`store::MediaStore`] trait over artifact
//! upload/fetch, a local filesystem implementation, QR-code PNG
//! rendering, and a retrying HTTP fetch wrapper.

pub mod fetch;
pub mod local;
pub mod qr;
pub mod store;

pub use local::LocalMediaStore;
pub use store::{ArtifactKind, MediaStore};
