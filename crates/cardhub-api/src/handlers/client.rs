//! Admin client management handlers (plus the public create route).

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, RequestExt};
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use cardhub_core::error::AppError;
use cardhub_core::types::response::Envelope;
use cardhub_entity::client::{Client, ClientPatch, ClientStatus};

use crate::dto::request::{
    CreateClientRequest, GetClientParams, ListClientsParams, StatusChangeRequest,
};
use crate::dto::response::{ClientWithAudit, CreatedClientResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, PaginationParams};
use crate::state::AppState;

fn pagination_meta<T: serde::Serialize>(
    page: &cardhub_core::types::pagination::PageResponse<T>,
) -> serde_json::Value {
    serde_json::json!({
        "page": page.page,
        "per_page": page.page_size,
        "total_items": page.total_items,
        "total_pages": page.total_pages,
    })
}

/// POST /api/clients — public submission (rate-limited).
pub async fn create_client(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let done = state
        .clients
        .create(body.into(), &actor.or("public"))
        .await?;

    let response = CreatedClientResponse {
        id: done.value.id,
        slug: done.value.slug.clone(),
    };
    let envelope = if done.has_warnings() {
        Envelope::ok_with_meta(
            response,
            "Client created",
            serde_json::json!({ "warnings": done.warnings }),
        )
    } else {
        Envelope::ok(response, "Client created")
    };

    Ok((StatusCode::CREATED, Json(envelope)))
}

/// GET /api/clients — admin search.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ListClientsParams>,
) -> Result<Json<Envelope<Vec<Client>>>, ApiError> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<ClientStatus>)
        .transpose()?;

    let page = state
        .clients
        .list(filter.q.as_deref(), status, params.into_page_request())
        .await?;

    let meta = pagination_meta(&page);
    Ok(Json(Envelope::ok_with_meta(page.items, "OK", meta)))
}

/// GET /api/clients/{id} — one entity, optionally with recent audit.
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<GetClientParams>,
) -> Result<Json<Envelope<serde_json::Value>>, ApiError> {
    let data = if params.include_audit {
        let (client, recent_audit) = state.clients.get_with_audit(id).await?;
        serde_json::to_value(ClientWithAudit {
            client,
            recent_audit,
        })?
    } else {
        serde_json::to_value(state.clients.get(id).await?)?
    };
    Ok(Json(Envelope::ok(data, "OK")))
}

/// PUT /api/clients/{id} — JSON patch, or multipart photo replacement.
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    request: Request,
) -> Result<Json<Envelope<Client>>, ApiError> {
    let actor = actor.or("admin");
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let client = if content_type.starts_with("multipart/form-data") {
        let mut multipart: Multipart = request
            .extract()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?;
        let photo = read_photo_field(&mut multipart).await?;
        state.clients.update_photo(id, photo, &actor).await?
    } else {
        let Json(patch): Json<ClientPatch> = request
            .extract()
            .await
            .map_err(|e| AppError::validation(format!("Invalid patch: {e}")))?;
        state.clients.update(id, patch, &actor).await?
    };

    Ok(Json(Envelope::ok(client, "Client updated")))
}

async fn read_photo_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart field: {e}")))?
    {
        if field.name() == Some("photo") {
            return field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read photo: {e}")));
        }
    }
    Err(AppError::validation("Multipart body has no 'photo' field"))
}

/// POST /api/clients/{id}/vcard — generate vCard artifacts.
pub async fn generate_vcard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<Envelope<Client>>, ApiError> {
    let done = state
        .clients
        .generate_vcard_artifacts(id, &actor.or("admin"))
        .await?;

    let envelope = if done.has_warnings() {
        Envelope::ok_with_meta(
            done.value,
            "vCard artifacts generated",
            serde_json::json!({ "warnings": done.warnings }),
        )
    } else {
        Envelope::ok(done.value, "vCard artifacts generated")
    };
    Ok(Json(envelope))
}

/// GET /api/clients/{id}/pdf — stream, rendering on demand.
pub async fn get_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Response, ApiError> {
    let client = state.clients.get(id).await?;
    let pdf = state.clients.fetch_pdf(id, &actor.or("admin")).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}.pdf\"", client.slug),
        )
        .header(header::CONTENT_LENGTH, pdf.len())
        .body(Body::from(pdf))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;
    Ok(response)
}

/// PUT /api/clients/{id}/status/{status} — lifecycle transition.
pub async fn change_status(
    State(state): State<AppState>,
    Path((id, status)): Path<(Uuid, String)>,
    actor: Actor,
    Json(body): Json<StatusChangeRequest>,
) -> Result<Json<Envelope<Client>>, ApiError> {
    let new_status: ClientStatus = status.parse()?;
    let client = state
        .clients
        .change_status(id, new_status, &body.notes, &actor.or("admin"))
        .await?;
    Ok(Json(Envelope::ok(client, "Status changed")))
}

/// DELETE /api/clients/{id} — soft delete.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(body): Json<StatusChangeRequest>,
) -> Result<Json<Envelope<Client>>, ApiError> {
    let client = state
        .clients
        .soft_delete(id, &body.notes, &actor.or("admin"))
        .await?;
    Ok(Json(Envelope::ok(client, "Client deleted")))
}
