//! Public, unauthenticated profile endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};

use cardhub_core::types::response::Envelope;
use cardhub_entity::client::PublicProfile;

use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/public/clients — active profiles only.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Envelope<Vec<PublicProfile>>>, ApiError> {
    let page = state.clients.list_public(params.into_page_request()).await?;
    let meta = serde_json::json!({
        "page": page.page,
        "per_page": page.page_size,
        "total_items": page.total_items,
        "total_pages": page.total_pages,
    });
    Ok(Json(Envelope::ok_with_meta(page.items, "OK", meta)))
}

/// GET /p/{slug_or_id} — one public profile.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> Result<Json<Envelope<PublicProfile>>, ApiError> {
    let profile = state.clients.get_public(&slug_or_id).await?;
    Ok(Json(Envelope::ok(profile, "OK")))
}
