//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cardhub_entity::audit::AuditLogEntry;
use cardhub_entity::client::Client;

/// Body returned by `POST /api/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedClientResponse {
    /// The new record's identifier.
    pub id: Uuid,
    /// The slug assigned to the record.
    pub slug: String,
}

/// A client joined with its recent audit entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientWithAudit {
    /// The client record.
    #[serde(flatten)]
    pub client: Client,
    /// Most recent audit entries targeting this client.
    pub recent_audit: Vec<AuditLogEntry>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Body of `GET /api/health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
    /// Whether the render gate currently has a free slot.
    pub render_gate_idle: bool,
}
