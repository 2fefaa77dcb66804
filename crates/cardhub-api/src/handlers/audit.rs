//! Audit log listing.

use axum::Json;
use axum::extract::{Query, State};

use cardhub_core::types::response::Envelope;
use cardhub_entity::audit::AuditLogEntry;

use crate::dto::request::AuditListParams;
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/audit — paginated audit listing, optional client filter.
pub async fn list_audit(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<AuditListParams>,
) -> Result<Json<Envelope<Vec<AuditLogEntry>>>, ApiError> {
    let page = state
        .audit_repo
        .search(filter.client_id, &params.into_page_request())
        .await?;
    let meta = serde_json::json!({
        "page": page.page,
        "per_page": page.page_size,
        "total_items": page.total_items,
        "total_pages": page.total_pages,
    });
    Ok(Json(Envelope::ok_with_meta(page.items, "OK", meta)))
}
