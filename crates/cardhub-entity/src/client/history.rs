//! Per-client embedded history trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a client's append-only history trail.
///
/// Entries are only ever appended; the trail is never mutated or
/// reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What happened (e.g. `"created"`, `"updated"`, `"status changed"`).
    pub action: String,
    /// Optional free-text notes supplied by the actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Who performed the action.
    pub actor: String,
    /// When the action occurred.
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create a new history entry timestamped now.
    pub fn now(action: impl Into<String>, actor: impl Into<String>, notes: Option<String>) -> Self {
        Self {
            action: action.into(),
            notes,
            actor: actor.into(),
            at: Utc::now(),
        }
    }
}
