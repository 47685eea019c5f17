//! Handlers for responses, nested under discussions:
//! `/discussions/{discussion_id}/responses[/{id}]`

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::status;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::mapping::discussion as mapping;
use forum_db::models::entity_ref::ParentKind;
use forum_db::models::response::{CreateResponse, ResponseToReturn, UpdateResponse};
use forum_db::repositories::{ResponseRepo, UserRepo};

use super::{check_initial_status, load_users, require_live_parent, require_parent, require_user};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::IncludeDeletedParams;
use crate::state::AppState;

/// POST /api/v1/discussions/{discussion_id}/responses
///
/// The parent comes from the path; a soft-deleted discussion takes no new
/// responses.
pub async fn create(
    State(state): State<AppState>,
    Path(discussion_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateResponse>,
) -> AppResult<(StatusCode, Json<ResponseToReturn>)> {
    require_text("comment", &input.comment)?;
    check_initial_status(input.status.as_deref())?;
    require_live_parent(&state.pool, ParentKind::Discussion, discussion_id).await?;
    let author = require_user(&state.pool, input.user_id).await?;

    let response =
        ResponseRepo::create(&state.pool, &mapping::new_response(discussion_id, &input)).await?;
    tracing::info!(discussion_id, response_id = response.id, "Response created");

    let body = mapping::response_to_return(&response, Some(&author))?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/discussions/{discussion_id}/responses
pub async fn list_by_discussion(
    State(state): State<AppState>,
    Path(discussion_id): Path<DbId>,
    Query(params): Query<IncludeDeletedParams>,
) -> AppResult<Json<Vec<ResponseToReturn>>> {
    require_parent(&state.pool, ParentKind::Discussion, discussion_id).await?;

    let responses: Vec<_> = ResponseRepo::list_by_discussion(&state.pool, discussion_id)
        .await?
        .into_iter()
        .filter(|r| params.include_deleted || !status::is_deleted(&r.status))
        .collect();
    let authors = load_users(&state.pool, responses.iter().map(|r| r.user_id)).await?;

    let body = responses
        .iter()
        .map(|r| mapping::response_to_return(r, authors.get(&r.user_id)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(body))
}

/// GET /api/v1/discussions/{discussion_id}/responses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((discussion_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ResponseToReturn>> {
    let response = ResponseRepo::find_by_id(&state.pool, discussion_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Response", id))?;
    let author = UserRepo::find_by_id(&state.pool, response.user_id).await?;
    Ok(Json(mapping::response_to_return(&response, author.as_ref())?))
}

/// PUT/PATCH /api/v1/discussions/{discussion_id}/responses/{id}
///
/// A `Deleted` response cannot be given another status (409).
pub async fn update(
    State(state): State<AppState>,
    Path((discussion_id, id)): Path<(DbId, DbId)>,
    ValidJson(input): ValidJson<UpdateResponse>,
) -> AppResult<Json<ResponseToReturn>> {
    require_text_if_present("comment", input.comment.as_deref())?;

    let response = ResponseRepo::update(&state.pool, discussion_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Response", id))?;
    let author = UserRepo::find_by_id(&state.pool, response.user_id).await?;
    Ok(Json(mapping::response_to_return(&response, author.as_ref())?))
}

/// DELETE /api/v1/discussions/{discussion_id}/responses/{id}
///
/// Soft delete.
pub async fn delete(
    State(state): State<AppState>,
    Path((discussion_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ResponseRepo::soft_delete(&state.pool, discussion_id, id).await?;
    if deleted {
        tracing::info!(discussion_id, response_id = id, "Response soft-deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Response", id))
    }
}
