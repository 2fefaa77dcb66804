//! Persistence seams for the client lifecycle.
//!
//! The service talks to storage through these traits rather than the
//! concrete sqlx repositories, so lifecycle invariants can be tested
//! against in-memory stores without a running database. The
//! entity-specific query methods live here; the repositories implement
//! them by delegation.

use async_trait::async_trait;
use uuid::Uuid;

use cardhub_core::result::AppResult;
use cardhub_core::types::pagination::{PageRequest, PageResponse};
use cardhub_database::repositories::audit::AuditLogRepository;
use cardhub_database::repositories::client::ClientRepository;
use cardhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};
use cardhub_entity::client::{Client, ClientStatus};

/// Client persistence as the lifecycle sees it.
#[async_trait]
pub trait ClientStore: Send + Sync + 'static {
    async fn create(&self, client: &Client) -> AppResult<Client>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Client>>;
    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;
    /// Persist an updated record; unknown ids are a not-found error.
    async fn update(&self, client: &Client) -> AppResult<()>;
    async fn search(
        &self,
        q: Option<&str>,
        status: Option<ClientStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Client>>;
    async fn list_active(&self, page: &PageRequest) -> AppResult<PageResponse<Client>>;
}

/// Audit persistence as the recorder sees it.
#[async_trait]
pub trait AuditStore: Send + Sync + 'static {
    async fn create(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry>;
    async fn recent_for_client(
        &self,
        client_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<AuditLogEntry>>;
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn create(&self, client: &Client) -> AppResult<Client> {
        ClientRepository::create(self, client).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        ClientRepository::find_by_id(self, id).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Client>> {
        ClientRepository::find_by_slug(self, slug).await
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        ClientRepository::slug_exists(self, slug).await
    }

    async fn update(&self, client: &Client) -> AppResult<()> {
        ClientRepository::update(self, client).await
    }

    async fn search(
        &self,
        q: Option<&str>,
        status: Option<ClientStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Client>> {
        ClientRepository::search(self, q, status, page).await
    }

    async fn list_active(&self, page: &PageRequest) -> AppResult<PageResponse<Client>> {
        ClientRepository::list_active(self, page).await
    }
}

#[async_trait]
impl AuditStore for AuditLogRepository {
    async fn create(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        AuditLogRepository::create(self, entry).await
    }

    async fn recent_for_client(
        &self,
        client_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<AuditLogEntry>> {
        AuditLogRepository::recent_for_client(self, client_id, limit).await
    }
}
