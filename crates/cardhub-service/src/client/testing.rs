//! In-memory stores and fixtures for lifecycle tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use cardhub_core::config::app::{CorsConfig, RateLimitConfig, ServerConfig};
use cardhub_core::config::email::EmailConfig;
use cardhub_core::config::lifecycle::LifecyclePolicy;
use cardhub_core::config::logging::LoggingConfig;
use cardhub_core::config::media::MediaConfig;
use cardhub_core::config::render::RenderConfig;
use cardhub_core::config::{AppConfig, DatabaseConfig};
use cardhub_core::error::AppError;
use cardhub_core::result::AppResult;
use cardhub_core::types::pagination::{PageRequest, PageResponse};
use cardhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};
use cardhub_entity::client::{Client, ClientStatus, HistoryEntry};
use cardhub_media::{ArtifactKind, MediaStore};
use cardhub_render::{PdfRenderer, RenderGate};

use crate::notify::Notifier;
use crate::store::{AuditStore, ClientStore};

use super::service::ClientService;

#[derive(Default)]
pub(crate) struct MemoryClientStore {
    pub clients: Mutex<HashMap<Uuid, Client>>,
}

impl MemoryClientStore {
    /// Snapshot of one stored record; panics when absent.
    pub fn stored(&self, id: Uuid) -> Client {
        self.clients.lock().unwrap().get(&id).cloned().unwrap()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn create(&self, client: &Client) -> AppResult<Client> {
        self.clients
            .lock()
            .unwrap()
            .insert(client.id, client.clone());
        Ok(client.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .values()
            .any(|c| c.slug == slug))
    }

    async fn update(&self, client: &Client) -> AppResult<()> {
        let mut clients = self.clients.lock().unwrap();
        if !clients.contains_key(&client.id) {
            return Err(AppError::not_found("Client not found"));
        }
        clients.insert(client.id, client.clone());
        Ok(())
    }

    async fn search(
        &self,
        q: Option<&str>,
        status: Option<ClientStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Client>> {
        let needle = q.map(str::to_lowercase);
        let mut items: Vec<Client> = self
            .clients
            .lock()
            .unwrap()
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .filter(|c| {
                needle
                    .as_deref()
                    .is_none_or(|n| c.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        items.sort_by_key(|c| c.created_at);
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn list_active(&self, page: &PageRequest) -> AppResult<PageResponse<Client>> {
        self.search(None, Some(ClientStatus::Active), page).await
    }
}

#[derive(Default)]
pub(crate) struct MemoryAuditStore {
    pub entries: Mutex<Vec<AuditLogEntry>>,
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn create(&self, entry: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        let stored = AuditLogEntry {
            id: Uuid::new_v4(),
            actor: entry.actor.clone(),
            action: entry.action.clone(),
            client_id: entry.client_id,
            notes: entry.notes.clone(),
            details: entry.details.clone(),
            created_at: Utc::now(),
        };
        self.entries.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn recent_for_client(
        &self,
        client_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.client_id == Some(client_id))
            .cloned()
            .collect();
        entries.reverse();
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

/// Media store over a map; uploads can be made to fail on demand.
#[derive(Debug, Default)]
pub(crate) struct MemoryMediaStore {
    pub fail_uploads: AtomicBool,
    pub files: Mutex<HashMap<String, Bytes>>,
}

impl MemoryMediaStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_uploads.store(true, Ordering::SeqCst);
        store
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, kind: ArtifactKind, client_id: Uuid, data: Bytes) -> AppResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::storage("Upload refused"));
        }
        let url = format!(
            "http://cards.test/media/{}/{}.{}",
            kind.namespace(),
            client_id,
            kind.extension()
        );
        self.files.lock().unwrap().insert(url.clone(), data);
        Ok(url)
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.files
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::storage(format!("No such artifact: {url}")))
    }
}

#[derive(Debug)]
pub(crate) struct StaticPdfRenderer;

#[async_trait]
impl PdfRenderer for StaticPdfRenderer {
    async fn render_pdf(&self, _client: &Client, _public_url: &str) -> AppResult<Bytes> {
        Ok(Bytes::from_static(b"%PDF-1.4 harness"))
    }
}

pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_base_url: "http://cards.test".to_string(),
            max_body_bytes: 1_048_576,
            shutdown_grace_seconds: 1,
            cors: CorsConfig::default(),
            rate_limit: RateLimitConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        media: MediaConfig::default(),
        render: RenderConfig::default(),
        email: EmailConfig::default(),
        lifecycle: LifecyclePolicy::default(),
        logging: LoggingConfig::default(),
    }
}

/// A record in the given status with one phone and a seeded history.
pub(crate) fn sample_client(status: ClientStatus) -> Client {
    let now = Utc::now();
    Client {
        id: Uuid::new_v4(),
        slug: "jane-doe".to_string(),
        name: "Jane Doe".to_string(),
        title: Some("Engineer".to_string()),
        phone1: Some("+1 555 0100".to_string()),
        phone2: None,
        phone3: None,
        email1: Some("jane@example.com".to_string()),
        email2: None,
        email3: None,
        company: Some("Acme".to_string()),
        bio: None,
        address: None,
        website: None,
        portfolio: None,
        map_url: None,
        social: Json(Default::default()),
        working_hours: Json(Default::default()),
        photo_url: None,
        pdf_url: None,
        vcard_url: None,
        qr_code_url: None,
        status,
        history: Json(vec![HistoryEntry::now("created", "public", None)]),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) struct Harness {
    pub service: ClientService,
    pub store: Arc<MemoryClientStore>,
    pub audit: Arc<MemoryAuditStore>,
    pub media: Arc<MemoryMediaStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_media(MemoryMediaStore::default())
    }

    pub fn with_media(media: MemoryMediaStore) -> Self {
        let store = Arc::new(MemoryClientStore::default());
        let audit = Arc::new(MemoryAuditStore::default());
        let media = Arc::new(media);
        let config = test_config();
        let notifier = Arc::new(
            Notifier::new(config.email.clone()).unwrap(),
        );

        let service = ClientService::new(
            &config,
            Arc::clone(&store) as Arc<dyn ClientStore>,
            Arc::clone(&audit) as Arc<dyn AuditStore>,
            notifier,
            Arc::clone(&media) as Arc<dyn MediaStore>,
            Arc::new(StaticPdfRenderer),
            RenderGate::new(Duration::from_millis(200)),
        );

        Self {
            service,
            store,
            audit,
            media,
        }
    }

    /// Seed one record straight into the store.
    pub fn seed(&self, client: Client) -> Uuid {
        let id = client.id;
        self.store.clients.lock().unwrap().insert(id, client);
        id
    }
}
