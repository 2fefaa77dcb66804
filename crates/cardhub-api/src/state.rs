//! Application state shared across all handlers and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use cardhub_core::config::AppConfig;
use cardhub_database::DatabasePool;
use cardhub_database::repositories::audit::AuditLogRepository;
use cardhub_render::RenderGate;
use cardhub_service::ClientService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped or otherwise cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db: DatabasePool,
    /// Audit log repository (read side; writes go through the service).
    pub audit_repo: Arc<AuditLogRepository>,
    /// Client lifecycle service.
    pub clients: Arc<ClientService>,
    /// Render admission gate (shared with the service; exposed for
    /// health reporting).
    pub render_gate: RenderGate,
    /// Per-IP rate limiter for the public submission endpoint.
    pub rate_limiter: RateLimiter,
    /// Root directory of locally stored media, served under `/media`.
    pub media_root: PathBuf,
}
