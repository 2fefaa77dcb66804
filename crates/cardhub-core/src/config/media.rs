//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Media pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory for locally stored artifacts.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Number of fetch attempts before giving up.
    #[serde(default = "default_fetch_attempts")]
    pub fetch_attempts: u32,
    /// Per-attempt fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    /// Base backoff delay between fetch attempts in milliseconds
    /// (doubles on each retry).
    #[serde(default = "default_backoff_base")]
    pub fetch_backoff_base_ms: u64,
    /// Pixel size of generated QR code images.
    #[serde(default = "default_qr_size")]
    pub qr_size_px: u32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            fetch_attempts: default_fetch_attempts(),
            fetch_timeout_seconds: default_fetch_timeout(),
            fetch_backoff_base_ms: default_backoff_base(),
            qr_size_px: default_qr_size(),
        }
    }
}

fn default_root_path() -> String {
    "./data/media".to_string()
}

fn default_fetch_attempts() -> u32 {
    3
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_backoff_base() -> u64 {
    500
}

fn default_qr_size() -> u32 {
    512
}
