//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable audit log entry recording a state-changing action.
///
/// Independent of the per-client embedded history trail; one entry is
/// written per mutating operation. Writes are best-effort and never
/// block or fail the triggering operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// Who performed the action (e.g. `"admin"`, `"public"`).
    pub actor: String,
    /// The action tag (e.g. `"client.created"`, `"client.status_changed"`).
    pub action: String,
    /// The client record the action targeted (if any).
    pub client_id: Option<Uuid>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Arbitrary payload snapshot (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// Who performed the action.
    pub actor: String,
    /// The action tag.
    pub action: String,
    /// Targeted client record.
    pub client_id: Option<Uuid>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Arbitrary payload snapshot.
    pub details: Option<serde_json::Value>,
}
