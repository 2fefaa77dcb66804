//! # cardhub-vcard
//!
//! Pure helpers with no async and no I/O: the vCard 3.0 text encoder
//! and the display-name slug generator. Both are deterministic —
//! identical input always produces byte-identical output.

pub mod encoder;
pub mod slug;

pub use encoder::encode_vcard;
pub use slug::slugify;
