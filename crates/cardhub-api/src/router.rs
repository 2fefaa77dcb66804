//! Route definitions for the CardHub HTTP API.
//!
//! Admin and public API routes live under `/api`; the public profile
//! page URL (`/p/{slug_or_id}`) and stored media (`/media`) are mounted
//! at the root because those URLs are printed on cards and embedded in
//! QR codes.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let submission_routes = Router::new()
        .route("/clients", post(handlers::client::create_client))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::enforce,
        ));

    let api_routes = Router::new()
        .merge(submission_routes)
        .merge(client_routes())
        .merge(public_routes())
        .merge(audit_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route("/p/{slug_or_id}", get(handlers::public::get_profile))
        .nest_service("/media", ServeDir::new(&state.media_root))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Admin client management.
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(handlers::client::list_clients))
        .route("/clients/{id}", get(handlers::client::get_client))
        .route("/clients/{id}", put(handlers::client::update_client))
        .route("/clients/{id}", delete(handlers::client::delete_client))
        .route(
            "/clients/{id}/vcard",
            post(handlers::client::generate_vcard),
        )
        .route("/clients/{id}/pdf", get(handlers::client::get_pdf))
        .route(
            "/clients/{id}/status/{status}",
            put(handlers::client::change_status),
        )
}

/// Public listing (profile page route is mounted at the root).
fn public_routes() -> Router<AppState> {
    Router::new().route("/public/clients", get(handlers::public::list_public))
}

fn audit_routes() -> Router<AppState> {
    Router::new().route("/audit", get(handlers::audit::list_audit))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
