//! PDF rendering configuration.

use serde::{Deserialize, Serialize};

/// Headless-browser PDF rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Path to the headless browser binary.
    #[serde(default = "default_browser_path")]
    pub browser_path: String,
    /// Maximum wall-clock time for a single render in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Maximum wait for a render-gate slot in milliseconds. Requests
    /// that cannot be admitted within this window fail fast with a
    /// busy error instead of queuing indefinitely.
    #[serde(default = "default_admission_wait")]
    pub admission_wait_ms: u64,
    /// Whether to attempt a best-effort PDF render when a client is
    /// first created. Failures only log a warning.
    #[serde(default)]
    pub generate_on_create: bool,
    /// Minimum size in bytes for a render output to count as valid.
    #[serde(default = "default_min_output")]
    pub min_output_bytes: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            browser_path: default_browser_path(),
            timeout_seconds: default_timeout(),
            admission_wait_ms: default_admission_wait(),
            generate_on_create: false,
            min_output_bytes: default_min_output(),
        }
    }
}

fn default_browser_path() -> String {
    "chromium".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_admission_wait() -> u64 {
    3000
}

fn default_min_output() -> u64 {
    256
}
