//! The standard response envelope shared by every API endpoint.

use serde::{Deserialize, Serialize};

/// Response envelope: `{ success, data, message, meta? }`.
///
/// Error responses reuse the same envelope with `success: false` and
/// `data: null`; the HTTP status code carries the error class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response payload (null on errors).
    pub data: Option<T>,
    /// Human-readable message.
    pub message: String,
    /// Optional metadata (pagination, non-fatal warnings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> Envelope<T> {
    /// A successful response with data.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            meta: None,
        }
    }

    /// A successful response with data and metadata.
    pub fn ok_with_meta(data: T, message: impl Into<String>, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            meta: Some(meta),
        }
    }

    /// A failed response (no data).
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            meta: None,
        }
    }
}
