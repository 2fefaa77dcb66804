//! Application builder — wires repositories, services, router, and
//! state into a running Axum server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tracing::info;

use cardhub_core::config::AppConfig;
use cardhub_core::error::AppError;
use cardhub_database::DatabasePool;
use cardhub_database::repositories::audit::AuditLogRepository;
use cardhub_database::repositories::client::ClientRepository;
use cardhub_media::{LocalMediaStore, MediaStore};
use cardhub_render::{ChromiumRenderer, PdfRenderer, RenderGate};
use cardhub_service::{ClientService, Notifier};

use crate::middleware::rate_limit::RateLimiter;
use crate::router::build_router;
use crate::state::AppState;

/// Assemble the application state from configuration and a database pool.
pub fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    let config = Arc::new(config);
    let pool: PgPool = db.pool().clone();

    let client_repo = Arc::new(ClientRepository::new(pool.clone()));
    let audit_repo = Arc::new(AuditLogRepository::new(pool));

    let notifier = Arc::new(Notifier::new(config.email.clone())?);
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        &config.media,
        &config.server.public_base_url,
    ));
    let renderer: Arc<dyn PdfRenderer> =
        Arc::new(ChromiumRenderer::new(config.render.clone()));
    let gate = RenderGate::new(Duration::from_millis(config.render.admission_wait_ms));

    let clients = Arc::new(ClientService::new(
        &config,
        client_repo,
        Arc::clone(&audit_repo) as Arc<dyn cardhub_service::AuditStore>,
        notifier,
        media,
        renderer,
        gate.clone(),
    ));

    let rate_limiter = RateLimiter::new(&config.server.rate_limit);
    let media_root = PathBuf::from(&config.media.root_path);

    Ok(AppState {
        config,
        db,
        audit_repo,
        clients,
        render_gate: gate,
        rate_limiter,
        media_root,
    })
}

/// Run the CardHub server until shutdown.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    info!("Starting CardHub server...");

    create_data_directories(&config).await?;

    let state = build_state(config, db)?;
    let server_config = state.config.server.clone();
    state.rate_limiter.start_pruning();

    let app = build_router(state)
        .into_make_service_with_connect_info::<std::net::SocketAddr>();

    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("CardHub server listening on {}", addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    info!("Shutdown requested, draining connections");
    let _ = shutdown_tx.send(());

    // Drain in-flight requests for at most the configured grace period.
    let grace = Duration::from_secs(server_config.shutdown_grace_seconds);
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("CardHub server stopped"),
        Ok(Ok(Err(e))) => return Err(AppError::internal(format!("Server error: {e}"))),
        Ok(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        Err(_) => tracing::warn!(
            grace_seconds = server_config.shutdown_grace_seconds,
            "Shutdown grace period elapsed, aborting open connections"
        ),
    }

    Ok(())
}

/// Pre-create the media namespaces so the static file service and
/// first uploads never race directory creation.
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    use cardhub_media::ArtifactKind;
    for kind in [
        ArtifactKind::Photo,
        ArtifactKind::Pdf,
        ArtifactKind::VcardFile,
        ArtifactKind::QrCode,
    ] {
        let dir = format!("{}/{}", config.media.root_path, kind.namespace());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
