//! Status transitions and soft deletion.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use cardhub_core::error::AppError;
use cardhub_core::result::AppResult;
use cardhub_entity::client::{Client, ClientStatus, HistoryEntry};

use super::service::ClientService;

impl ClientService {
    /// Move a client to a new lifecycle status.
    ///
    /// Notes are mandatory on every transition; the trail must explain
    /// why a record changed state.
    pub async fn change_status(
        &self,
        id: Uuid,
        new_status: ClientStatus,
        notes: &str,
        actor: &str,
    ) -> AppResult<Client> {
        let notes = notes.trim();
        // Character count, not byte length: multibyte notes must not
        // slip under the minimum.
        if notes.chars().count() < self.policy.min_notes_len {
            return Err(AppError::validation(format!(
                "Status-change notes must be at least {} characters",
                self.policy.min_notes_len
            )));
        }

        let mut client = self.get(id).await?;
        let from = client.status;
        if !from.can_transition_to(new_status) {
            return Err(AppError::conflict(format!(
                "Illegal status transition: {from} -> {new_status}"
            )));
        }

        client.status = new_status;
        client.history.0.push(HistoryEntry::now(
            "status changed",
            actor,
            Some(notes.to_string()),
        ));
        client.updated_at = Utc::now();
        self.repo.update(&client).await?;

        info!(client_id = %id, %from, to = %new_status, "Client status changed");
        self.audit.record(
            actor,
            "client.status_changed",
            Some(id),
            Some(notes.to_string()),
            Some(serde_json::json!({ "from": from, "to": new_status })),
        );

        Ok(client)
    }

    /// Soft-delete a client. The record stays in the database flagged
    /// as deleted; nothing is ever physically removed.
    pub async fn soft_delete(&self, id: Uuid, notes: &str, actor: &str) -> AppResult<Client> {
        self.change_status(id, ClientStatus::Deleted, notes, actor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cardhub_core::error::ErrorKind;

    use crate::client::testing::{Harness, sample_client};

    #[tokio::test]
    async fn short_notes_are_rejected_and_nothing_changes() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Pending));

        let err = h
            .service
            .change_status(id, ClientStatus::Rejected, "no", "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let stored = h.store.stored(id);
        assert_eq!(stored.status, ClientStatus::Pending);
        assert_eq!(stored.history.0.len(), 1);
    }

    #[tokio::test]
    async fn notes_minimum_counts_characters_not_bytes() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Pending));

        // Three characters but six bytes; still under the minimum.
        let err = h
            .service
            .change_status(id, ClientStatus::Rejected, "ééé", "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(h.store.stored(id).status, ClientStatus::Pending);

        // Five multibyte characters clear it.
        h.service
            .change_status(id, ClientStatus::Rejected, "ééééé", "admin")
            .await
            .unwrap();
        assert_eq!(h.store.stored(id).status, ClientStatus::Rejected);
    }

    #[tokio::test]
    async fn illegal_transition_is_a_conflict() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Active));

        let err = h
            .service
            .change_status(id, ClientStatus::Pending, "rollback please", "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(h.store.stored(id).status, ClientStatus::Active);
    }

    #[tokio::test]
    async fn soft_delete_is_terminal() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Active));

        h.service
            .soft_delete(id, "client asked for removal", "admin")
            .await
            .unwrap();
        assert_eq!(h.store.stored(id).status, ClientStatus::Deleted);

        let err = h
            .service
            .change_status(id, ClientStatus::Active, "bring it back", "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
