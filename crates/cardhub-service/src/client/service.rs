//! Core client CRUD and query operations.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

use cardhub_core::config::AppConfig;
use cardhub_core::config::lifecycle::LifecyclePolicy;
use cardhub_core::error::AppError;
use cardhub_core::result::AppResult;
use cardhub_core::types::pagination::{PageRequest, PageResponse};
use cardhub_entity::audit::AuditLogEntry;
use cardhub_entity::client::{
    Client, ClientPatch, ClientStatus, CreateClient, HistoryEntry, PublicProfile,
};
use cardhub_media::{ArtifactKind, MediaStore};
use cardhub_render::{PdfRenderer, RenderGate};
use cardhub_vcard::slug::{self, MAX_NUMERIC_SUFFIX};

use crate::audit::AuditRecorder;
use crate::completed::Completed;
use crate::notify::Notifier;
use crate::store::{AuditStore, ClientStore};

/// How many recent audit entries accompany a `get_with_audit` lookup.
const RECENT_AUDIT_LIMIT: i64 = 20;

/// Orchestrates the full client lifecycle.
pub struct ClientService {
    pub(crate) repo: Arc<dyn ClientStore>,
    pub(crate) audit: AuditRecorder,
    pub(crate) notifier: Arc<Notifier>,
    pub(crate) media: Arc<dyn MediaStore>,
    pub(crate) renderer: Arc<dyn PdfRenderer>,
    pub(crate) gate: RenderGate,
    pub(crate) policy: LifecyclePolicy,
    pub(crate) public_base_url: String,
    pub(crate) qr_size_px: u32,
    pub(crate) generate_on_create: bool,
    audit_repo: Arc<dyn AuditStore>,
}

impl ClientService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &AppConfig,
        repo: Arc<dyn ClientStore>,
        audit_repo: Arc<dyn AuditStore>,
        notifier: Arc<Notifier>,
        media: Arc<dyn MediaStore>,
        renderer: Arc<dyn PdfRenderer>,
        gate: RenderGate,
    ) -> Self {
        Self {
            repo,
            audit: AuditRecorder::new(Arc::clone(&audit_repo)),
            notifier,
            media,
            renderer,
            gate,
            policy: config.lifecycle.clone(),
            public_base_url: config
                .server
                .public_base_url
                .trim_end_matches('/')
                .to_string(),
            qr_size_px: config.media.qr_size_px,
            generate_on_create: config.render.generate_on_create,
            audit_repo,
        }
    }

    /// The public profile URL for a slug.
    pub(crate) fn public_url_for(&self, slug: &str) -> String {
        format!("{}/p/{}", self.public_base_url, slug)
    }

    /// Create a new client record from a public submission.
    pub async fn create(&self, input: CreateClient, actor: &str) -> AppResult<Completed<Client>> {
        self.validate_submission(&input)?;

        let slug = self.unique_slug(&input.name).await?;
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            slug,
            name: input.name.trim().to_string(),
            title: input.title,
            phone1: input.phone1,
            phone2: input.phone2,
            phone3: input.phone3,
            email1: input.email1,
            email2: input.email2,
            email3: input.email3,
            company: input.company,
            bio: input.bio,
            address: input.address,
            website: input.website,
            portfolio: input.portfolio,
            map_url: input.map_url,
            social: Json(input.social.unwrap_or_default()),
            working_hours: Json(input.working_hours.unwrap_or_default()),
            photo_url: None,
            pdf_url: None,
            vcard_url: None,
            qr_code_url: None,
            status: ClientStatus::Pending,
            history: Json(vec![HistoryEntry::now("created", actor, None)]),
            created_at: now,
            updated_at: now,
        };

        let mut client = self.repo.create(&client).await?;
        info!(client_id = %client.id, slug = %client.slug, "Client created");

        self.audit.record(
            actor,
            "client.created",
            Some(client.id),
            None,
            Some(serde_json::json!({ "name": client.name, "slug": client.slug })),
        );

        let mut done = Completed::clean(client.clone());

        if let Err(e) = self.notifier.notify_admin_new_client(&client).await {
            warn!(client_id = %client.id, error = %e, "Admin notification failed");
            done.warn(format!("Admin notification failed: {}", e.message));
        }

        if self.generate_on_create {
            match self.generate_initial_pdf(&mut client, actor).await {
                Ok(()) => done.value = client,
                Err(e) => {
                    warn!(client_id = %client.id, error = %e, "Initial PDF generation failed");
                    done.warn(format!("Initial PDF generation failed: {}", e.message));
                }
            }
        }

        Ok(done)
    }

    /// Apply a typed patch to an existing client.
    pub async fn update(&self, id: Uuid, patch: ClientPatch, actor: &str) -> AppResult<Client> {
        if patch.is_empty() {
            return Err(AppError::validation("Patch contains no changes"));
        }

        let mut client = self.get(id).await?;
        if client.status == ClientStatus::Deleted {
            return Err(AppError::conflict("Deleted clients cannot be updated"));
        }

        let details = serde_json::to_value(&patch).ok();
        patch.apply_to(&mut client);
        if client.name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be emptied"));
        }

        // An admin touching a fresh submission counts as triage: the
        // record leaves the pending queue.
        if client.status == ClientStatus::Pending {
            client.status = ClientStatus::Processed;
        }

        client
            .history
            .0
            .push(HistoryEntry::now("updated", actor, None));
        client.updated_at = Utc::now();
        self.repo.update(&client).await?;

        self.audit
            .record(actor, "client.updated", Some(client.id), None, details);

        Ok(client)
    }

    /// Replace the profile photo.
    pub async fn update_photo(&self, id: Uuid, data: Bytes, actor: &str) -> AppResult<Client> {
        if data.is_empty() {
            return Err(AppError::validation("Photo upload is empty"));
        }

        let mut client = self.get(id).await?;
        if client.status == ClientStatus::Deleted {
            return Err(AppError::conflict("Deleted clients cannot be updated"));
        }

        let url = self.media.upload(ArtifactKind::Photo, id, data).await?;
        client.photo_url = Some(url);
        client
            .history
            .0
            .push(HistoryEntry::now("photo updated", actor, None));
        client.updated_at = Utc::now();
        self.repo.update(&client).await?;

        self.audit
            .record(actor, "client.photo_updated", Some(id), None, None);

        Ok(client)
    }

    /// Load one client, or not-found.
    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Load one client together with its recent audit entries.
    pub async fn get_with_audit(&self, id: Uuid) -> AppResult<(Client, Vec<AuditLogEntry>)> {
        let client = self.get(id).await?;
        let entries = self
            .audit_repo
            .recent_for_client(id, RECENT_AUDIT_LIMIT)
            .await?;
        Ok((client, entries))
    }

    /// Admin search across all records.
    pub async fn list(
        &self,
        q: Option<&str>,
        status: Option<ClientStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Client>> {
        self.repo.search(q, status, &page).await
    }

    /// Lightweight public listing of active profiles.
    pub async fn list_public(&self, page: PageRequest) -> AppResult<PageResponse<PublicProfile>> {
        let clients = self.repo.list_active(&page).await?;
        Ok(PageResponse::new(
            clients.items.iter().map(PublicProfile::from).collect(),
            clients.page,
            clients.page_size,
            clients.total_items,
        ))
    }

    /// Public profile lookup by slug or UUID.
    ///
    /// Hidden records (disabled, deleted) answer not-found rather than
    /// revealing their existence.
    pub async fn get_public(&self, slug_or_id: &str) -> AppResult<PublicProfile> {
        let client = match Uuid::parse_str(slug_or_id) {
            Ok(id) => self.repo.find_by_id(id).await?,
            Err(_) => self.repo.find_by_slug(slug_or_id).await?,
        };

        match client {
            Some(c) if c.status.is_public() => Ok(PublicProfile::from(&c)),
            _ => Err(AppError::not_found("Profile not found")),
        }
    }

    fn validate_submission(&self, input: &CreateClient) -> AppResult<()> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.policy.require_company
            && input.company.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(AppError::validation("Company is required"));
        }
        if self.policy.require_contact_channel {
            let has_channel = [
                &input.phone1,
                &input.phone2,
                &input.phone3,
                &input.email1,
                &input.email2,
                &input.email3,
            ]
            .into_iter()
            .any(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()));
            if !has_channel {
                return Err(AppError::validation(
                    "At least one phone number or email address is required",
                ));
            }
        }
        Ok(())
    }

    /// Derive a slug no existing record uses.
    ///
    /// Probes the base slug, then numeric suffixes 1..=9, then falls
    /// back to a random suffix without probing (collision odds are
    /// negligible and the unique index backstops it).
    pub(crate) async fn unique_slug(&self, name: &str) -> AppResult<String> {
        let base = slug::slugify(name);
        if !self.repo.slug_exists(&base).await? {
            return Ok(base);
        }
        for n in 1..=MAX_NUMERIC_SUFFIX {
            let candidate = slug::with_numeric_suffix(&base, n);
            if !self.repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Ok(slug::with_random_suffix(&base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::client::testing::{Harness, sample_client};

    fn submission() -> CreateClient {
        CreateClient {
            name: "Jane Doe".to_string(),
            title: None,
            phone1: Some("+1 555 0100".to_string()),
            phone2: None,
            phone3: None,
            email1: None,
            email2: None,
            email3: None,
            company: Some("Acme".to_string()),
            bio: None,
            address: None,
            website: None,
            portfolio: None,
            map_url: None,
            social: None,
            working_hours: None,
        }
    }

    #[tokio::test]
    async fn create_starts_pending_with_one_history_entry() {
        let h = Harness::new();
        let done = h.service.create(submission(), "public").await.unwrap();

        let client = done.value;
        assert_eq!(client.status, ClientStatus::Pending);
        assert_eq!(client.slug, "jane-doe");
        assert_eq!(client.history.0.len(), 1);
        assert_eq!(h.store.stored(client.id).status, ClientStatus::Pending);
    }

    #[tokio::test]
    async fn create_writes_an_audit_entry() {
        let h = Harness::new();
        let done = h.service.create(submission(), "public").await.unwrap();

        // The audit write runs on a detached task.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let entries = h.audit.entries.lock().unwrap();
        assert!(
            entries
                .iter()
                .any(|e| e.action == "client.created" && e.client_id == Some(done.value.id))
        );
    }

    #[tokio::test]
    async fn update_promotes_pending_to_processed() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Pending));

        let patch = ClientPatch {
            title: Some("CTO".to_string()),
            ..ClientPatch::default()
        };
        let updated = h.service.update(id, patch, "admin").await.unwrap();

        assert_eq!(updated.status, ClientStatus::Processed);
        assert_eq!(updated.history.0.len(), 2);
        assert_eq!(h.store.stored(id).status, ClientStatus::Processed);
    }

    #[tokio::test]
    async fn update_leaves_non_pending_status_alone() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Active));

        let patch = ClientPatch {
            bio: Some("New bio".to_string()),
            ..ClientPatch::default()
        };
        let updated = h.service.update(id, patch, "admin").await.unwrap();

        assert_eq!(updated.status, ClientStatus::Active);
    }

    #[tokio::test]
    async fn every_successful_mutation_appends_one_history_entry() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Pending));
        assert_eq!(h.store.stored(id).history.0.len(), 1);

        let patch = ClientPatch {
            title: Some("CTO".to_string()),
            ..ClientPatch::default()
        };
        h.service.update(id, patch, "admin").await.unwrap();
        assert_eq!(h.store.stored(id).history.0.len(), 2);

        h.service
            .change_status(id, ClientStatus::Disabled, "spam record", "admin")
            .await
            .unwrap();
        assert_eq!(h.store.stored(id).history.0.len(), 3);
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let h = Harness::new();
        let id = h.seed(sample_client(ClientStatus::Pending));

        let err = h
            .service
            .update(id, ClientPatch::default(), "admin")
            .await
            .unwrap_err();
        assert_eq!(err.kind, cardhub_core::error::ErrorKind::Validation);
        assert_eq!(h.store.stored(id).history.0.len(), 1);
    }
}
