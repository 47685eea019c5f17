//! Handlers for participants.
//!
//! Mounted twice, under `/discussions/{discussion_id}/participants` and
//! `/work-items/{work_item_id}/participants`. The route layer supplies the
//! owner kind as an [`Extension`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use forum_core::types::DbId;
use forum_db::mapping::common::new_participant;
use forum_db::models::entity_ref::ParentKind;
use forum_db::models::participant::{CreateParticipant, Participant, UpdateParticipant};
use forum_db::repositories::ParticipantRepo;

use super::{require_organization_type, require_parent};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

/// POST .../{parent_id}/participants
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path(parent_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateParticipant>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    require_parent(&state.pool, kind, parent_id).await?;
    require_organization_type(&state.pool, input.organization_type_id).await?;

    let participant =
        ParticipantRepo::create(&state.pool, kind, &new_participant(parent_id, &input)).await?;
    tracing::info!(
        parent = kind.entity_name(),
        parent_id,
        participant_id = participant.id,
        "Participant added"
    );
    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET .../{parent_id}/participants
pub async fn list_by_parent(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path(parent_id): Path<DbId>,
) -> AppResult<Json<Vec<Participant>>> {
    require_parent(&state.pool, kind, parent_id).await?;
    let participants = ParticipantRepo::list_by_parent(&state.pool, kind, parent_id).await?;
    Ok(Json(participants))
}

/// GET .../{parent_id}/participants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Participant>> {
    let participant = ParticipantRepo::find_by_id(&state.pool, kind, parent_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Participant", id))?;
    Ok(Json(participant))
}

/// PUT/PATCH .../{parent_id}/participants/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
    ValidJson(input): ValidJson<UpdateParticipant>,
) -> AppResult<Json<Participant>> {
    require_organization_type(&state.pool, input.organization_type_id).await?;
    let participant = ParticipantRepo::update(&state.pool, kind, parent_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Participant", id))?;
    Ok(Json(participant))
}

/// DELETE .../{parent_id}/participants/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<ParentKind>,
    Path((parent_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ParticipantRepo::delete(&state.pool, kind, parent_id, id).await?;
    if deleted {
        tracing::info!(parent_id, participant_id = id, "Participant removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Participant", id))
    }
}
