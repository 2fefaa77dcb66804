//! vCard and QR artifact generation.

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use cardhub_core::error::AppError;
use cardhub_core::result::AppResult;
use cardhub_entity::client::{Client, ClientStatus, HistoryEntry};
use cardhub_media::{ArtifactKind, qr};
use cardhub_vcard::encode_vcard;

use crate::completed::Completed;

use super::service::ClientService;

impl ClientService {
    /// Generate the vCard file and QR code for a client, activating it.
    ///
    /// Both uploads must succeed before any state changes; a storage
    /// failure leaves the record exactly as it was. The QR code encodes
    /// the public profile URL, not the vCard file URL, so a later
    /// artifact regeneration never invalidates printed codes.
    pub async fn generate_vcard_artifacts(
        &self,
        id: Uuid,
        actor: &str,
    ) -> AppResult<Completed<Client>> {
        let mut client = self.get(id).await?;

        if client.name.trim().is_empty() {
            return Err(AppError::validation("Client has no name"));
        }
        if !client.has_contact_channel() {
            return Err(AppError::validation(
                "Client needs at least one phone number or email address before a vCard can be generated",
            ));
        }
        if client.status != ClientStatus::Active
            && !client.status.can_transition_to(ClientStatus::Active)
        {
            return Err(AppError::conflict(format!(
                "Cannot activate a client in status '{}'",
                client.status
            )));
        }

        let public_url = self.public_url_for(&client.slug);

        let vcard_text = encode_vcard(&client);
        let vcard_url = self
            .media
            .upload(ArtifactKind::VcardFile, id, Bytes::from(vcard_text))
            .await?;

        let qr_png = qr::render_qr_png(&public_url, self.qr_size_px)?;
        let qr_url = self.media.upload(ArtifactKind::QrCode, id, qr_png).await?;

        let from_status = client.status;
        client.vcard_url = Some(vcard_url);
        client.qr_code_url = Some(qr_url);
        client.status = ClientStatus::Active;
        client
            .history
            .0
            .push(HistoryEntry::now("vcard created", actor, None));
        client.updated_at = Utc::now();
        self.repo.update(&client).await?;

        info!(client_id = %id, slug = %client.slug, "vCard artifacts generated");
        self.audit.record(
            actor,
            "client.vcard_generated",
            Some(id),
            None,
            Some(serde_json::json!({
                "from_status": from_status,
                "public_url": public_url,
            })),
        );

        let mut done = Completed::clean(client.clone());
        if let Err(e) = self
            .notifier
            .notify_client_card_ready(&client, &public_url)
            .await
        {
            warn!(client_id = %id, error = %e, "Card-ready notification failed");
            done.warn(format!("Client notification failed: {}", e.message));
        }

        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cardhub_core::error::ErrorKind;

    use crate::client::testing::{Harness, MemoryMediaStore, sample_client};

    #[tokio::test]
    async fn upload_failure_leaves_the_record_untouched() {
        let h = Harness::with_media(MemoryMediaStore::failing());
        let id = h.seed(sample_client(ClientStatus::Pending));

        let err = h
            .service
            .generate_vcard_artifacts(id, "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        let stored = h.store.stored(id);
        assert_eq!(stored.status, ClientStatus::Pending);
        assert!(stored.vcard_url.is_none());
        assert!(stored.qr_code_url.is_none());
        assert_eq!(stored.history.0.len(), 1);
    }

    #[tokio::test]
    async fn success_activates_and_stores_both_artifacts() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Processed));

        let done = h
            .service
            .generate_vcard_artifacts(id, "admin")
            .await
            .unwrap();
        assert!(!done.has_warnings());

        let stored = h.store.stored(id);
        assert_eq!(stored.status, ClientStatus::Active);
        assert!(stored.vcard_url.is_some());
        assert!(stored.qr_code_url.is_some());
        assert_eq!(stored.history.0.len(), 2);
    }

    #[tokio::test]
    async fn contactless_record_is_a_validation_error() {
        let h = Harness::new();
        let mut client = sample_client(ClientStatus::Pending);
        client.phone1 = None;
        client.email1 = None;
        let id = h.seed(client);

        let err = h
            .service
            .generate_vcard_artifacts(id, "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
