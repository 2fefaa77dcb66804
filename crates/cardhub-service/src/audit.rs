//! Fire-and-forget audit log recording.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use cardhub_entity::audit::CreateAuditLogEntry;

use crate::store::AuditStore;

/// Records audit entries on a detached task.
///
/// Audit writes must never block or fail the triggering operation, so
/// `record` returns immediately and a failed write only logs a warning.
#[derive(Clone)]
pub struct AuditRecorder {
    repo: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditStore>) -> Self {
        Self { repo }
    }

    /// Queue an audit entry for writing.
    pub fn record(
        &self,
        actor: &str,
        action: &str,
        client_id: Option<Uuid>,
        notes: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        let entry = CreateAuditLogEntry {
            actor: actor.to_string(),
            action: action.to_string(),
            client_id,
            notes,
            details,
        };
        let repo = Arc::clone(&self.repo);
        tokio::spawn(async move {
            if let Err(e) = repo.create(&entry).await {
                warn!(
                    action = %entry.action,
                    client_id = ?entry.client_id,
                    error = %e,
                    "Failed to write audit entry"
                );
            }
        });
    }
}
