//! Handlers for URL attachments.
//!
//! Discussions call them attachments, work items call them documents; the
//! shape is the same and the route layer supplies the owner kind.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use forum_core::types::DbId;
use forum_db::mapping::common::new_attachment;
use forum_db::models::attachment::{Attachment, CreateAttachment, UpdateAttachment};
use forum_db::models::entity_ref::ParentKind;
use forum_db::repositories::AttachmentRepo;

use super::require_parent;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

/// Entity name reported in not-found errors.
fn entity_name(kind: ParentKind) -> &'static str {
    match kind {
        ParentKind::Discussion => "Attachment",
        ParentKind::WorkItem => "Document",
    }
}

/// POST .../{parent_id}/attachments | documents
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path(parent_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateAttachment>,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    require_parent(&state.pool, kind, parent_id).await?;
    let attachment =
        AttachmentRepo::create(&state.pool, kind, &new_attachment(parent_id, &input)).await?;
    tracing::info!(
        parent_id,
        attachment_id = attachment.id,
        "{} created",
        entity_name(kind)
    );
    Ok((StatusCode::CREATED, Json(attachment)))
}

/// GET .../{parent_id}/attachments | documents
pub async fn list_by_parent(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path(parent_id): Path<DbId>,
) -> AppResult<Json<Vec<Attachment>>> {
    require_parent(&state.pool, kind, parent_id).await?;
    Ok(Json(
        AttachmentRepo::list_by_parent(&state.pool, kind, parent_id).await?,
    ))
}

/// GET .../{parent_id}/attachments/{id} | documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Attachment>> {
    AttachmentRepo::find_by_id(&state.pool, kind, parent_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(entity_name(kind), id))
}

/// PUT/PATCH .../{parent_id}/attachments/{id} | documents/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
    ValidJson(input): ValidJson<UpdateAttachment>,
) -> AppResult<Json<Attachment>> {
    AttachmentRepo::update(&state.pool, kind, parent_id, id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(entity_name(kind), id))
}

/// DELETE .../{parent_id}/attachments/{id} | documents/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if AttachmentRepo::delete(&state.pool, kind, parent_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(entity_name(kind), id))
    }
}
