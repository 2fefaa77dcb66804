//! Client repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;
use cardhub_core::types::pagination::{PageRequest, PageResponse};
use cardhub_entity::client::{Client, ClientStatus};

/// Repository for client records.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fully-populated client row.
    pub async fn create(&self, client: &Client) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients \
             (id, slug, name, title, phone1, phone2, phone3, email1, email2, email3, \
              company, bio, address, website, portfolio, map_url, social, working_hours, \
              photo_url, pdf_url, vcard_url, qr_code_url, status, history, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
              $17, $18, $19, $20, $21, $22, $23, $24, $25, $26) \
             RETURNING *",
        )
        .bind(client.id)
        .bind(&client.slug)
        .bind(&client.name)
        .bind(&client.title)
        .bind(&client.phone1)
        .bind(&client.phone2)
        .bind(&client.phone3)
        .bind(&client.email1)
        .bind(&client.email2)
        .bind(&client.email3)
        .bind(&client.company)
        .bind(&client.bio)
        .bind(&client.address)
        .bind(&client.website)
        .bind(&client.portfolio)
        .bind(&client.map_url)
        .bind(&client.social)
        .bind(&client.working_hours)
        .bind(&client.photo_url)
        .bind(&client.pdf_url)
        .bind(&client.vcard_url)
        .bind(&client.qr_code_url)
        .bind(client.status)
        .bind(&client.history)
        .bind(client.created_at)
        .bind(client.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create client", e))
    }

    /// Find a client by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client", e))
    }

    /// Find a client by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by slug", e)
            })
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe slug", e))
    }

    /// Persist the full state of an existing client row.
    ///
    /// Last write wins; there is no optimistic-concurrency token.
    pub async fn update(&self, client: &Client) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE clients SET \
             slug = $2, name = $3, title = $4, phone1 = $5, phone2 = $6, phone3 = $7, \
             email1 = $8, email2 = $9, email3 = $10, company = $11, bio = $12, address = $13, \
             website = $14, portfolio = $15, map_url = $16, social = $17, working_hours = $18, \
             photo_url = $19, pdf_url = $20, vcard_url = $21, qr_code_url = $22, \
             status = $23, history = $24, updated_at = $25 \
             WHERE id = $1",
        )
        .bind(client.id)
        .bind(&client.slug)
        .bind(&client.name)
        .bind(&client.title)
        .bind(&client.phone1)
        .bind(&client.phone2)
        .bind(&client.phone3)
        .bind(&client.email1)
        .bind(&client.email2)
        .bind(&client.email3)
        .bind(&client.company)
        .bind(&client.bio)
        .bind(&client.address)
        .bind(&client.website)
        .bind(&client.portfolio)
        .bind(&client.map_url)
        .bind(&client.social)
        .bind(&client.working_hours)
        .bind(&client.photo_url)
        .bind(&client.pdf_url)
        .bind(&client.vcard_url)
        .bind(&client.qr_code_url)
        .bind(client.status)
        .bind(&client.history)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update client", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Client not found"));
        }
        Ok(())
    }

    /// Search clients with free-text and status filters.
    ///
    /// The free-text query matches case-insensitive substrings across
    /// name, company, emails, and phones.
    pub async fn search(
        &self,
        q: Option<&str>,
        status: Option<ClientStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Client>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if q.is_some() {
            conditions.push(format!(
                "(name ILIKE ${p} OR company ILIKE ${p} \
                 OR email1 ILIKE ${p} OR email2 ILIKE ${p} OR email3 ILIKE ${p} \
                 OR phone1 ILIKE ${p} OR phone2 ILIKE ${p} OR phone3 ILIKE ${p})",
                p = param_idx
            ));
            param_idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM clients {where_clause}");
        let select_sql = format!(
            "SELECT * FROM clients {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Client>(&select_sql);

        if let Some(q) = q {
            let pattern = format!("%{q}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }
        if let Some(status) = status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))?;

        let clients = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search clients", e)
            })?;

        Ok(PageResponse::new(
            clients,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List active clients for the lightweight public listing.
    pub async fn list_active(&self, page: &PageRequest) -> AppResult<PageResponse<Client>> {
        self.search(None, Some(ClientStatus::Active), page).await
    }
}
