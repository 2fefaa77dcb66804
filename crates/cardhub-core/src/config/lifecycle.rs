//! Client lifecycle policy knobs.

use serde::{Deserialize, Serialize};

/// Policy constants for client lifecycle operations.
///
/// The required-field set for creation varies by deployment, so it is
/// configuration rather than code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    /// Minimum length of the `notes` field on status changes and
    /// soft deletes.
    #[serde(default = "default_min_notes_len")]
    pub min_notes_len: usize,
    /// Whether creation requires the company field.
    #[serde(default = "default_true")]
    pub require_company: bool,
    /// Whether creation requires at least one phone or email.
    #[serde(default = "default_true")]
    pub require_contact_channel: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            min_notes_len: default_min_notes_len(),
            require_company: true,
            require_contact_channel: true,
        }
    }
}

fn default_min_notes_len() -> usize {
    5
}

fn default_true() -> bool {
    true
}
