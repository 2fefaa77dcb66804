//! Audit log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;
use cardhub_core::types::pagination::{PageRequest, PageResponse};
use cardhub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

/// Repository for audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an audit log entry.
    pub async fn create(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor, action, client_id, notes, details) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.actor)
        .bind(&data.action)
        .bind(data.client_id)
        .bind(&data.notes)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    /// Search audit log, optionally filtered by target client.
    pub async fn search(
        &self,
        client_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let (where_clause, limit_idx) = if client_id.is_some() {
            ("WHERE client_id = $1", 2u32)
        } else {
            ("", 1u32)
        };

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} ORDER BY created_at DESC LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(cid) = client_id {
            count_query = count_query.bind(cid);
            select_query = select_query.bind(cid);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Most recent entries for one client.
    pub async fn recent_for_client(
        &self,
        client_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE client_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(client_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load audit entries", e)
        })
    }
}
