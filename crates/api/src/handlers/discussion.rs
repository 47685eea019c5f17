//! Handlers for the `/discussions` resource.
//!
//! Discussions are returned through the projection layer: the author's
//! display name is attached and the status is derived at request time.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::mapping::discussion as mapping;
use forum_db::models::discussion::{
    CreateDiscussion, DiscussionFilter, DiscussionForList, DiscussionToReturn, UpdateDiscussion,
};
use forum_db::models::response::Response;
use forum_db::repositories::{DiscussionRepo, ResponseRepo, UserRepo};

use super::{check_initial_status, load_users, require_user};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::ListParams;
use crate::state::AppState;

/// POST /api/v1/discussions
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateDiscussion>,
) -> AppResult<(StatusCode, Json<DiscussionToReturn>)> {
    require_text("subject", &input.subject)?;
    check_initial_status(input.status.as_deref())?;
    let author = require_user(&state.pool, input.user_id).await?;

    let discussion = DiscussionRepo::create(&state.pool, &mapping::new_discussion(&input)).await?;
    tracing::info!(
        discussion_id = discussion.id,
        user_id = discussion.user_id,
        "Discussion created"
    );

    let body = mapping::to_return(&discussion, Some(&author), state.clock.utc())?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/discussions
///
/// Each entry carries the size of its response collection.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<DiscussionForList>>> {
    let filter = DiscussionFilter {
        status: params.status(),
        include_deleted: params.include_deleted,
        limit: params.limit(),
        offset: params.offset(),
    };
    let discussions = DiscussionRepo::list(&state.pool, &filter).await?;

    let ids: Vec<DbId> = discussions.iter().map(|d| d.id).collect();
    let mut responses: HashMap<DbId, Vec<Response>> = HashMap::new();
    for response in ResponseRepo::list_by_discussions(&state.pool, &ids).await? {
        responses
            .entry(response.discussion_id)
            .or_default()
            .push(response);
    }
    let authors = load_users(&state.pool, discussions.iter().map(|d| d.user_id)).await?;

    let now = state.clock.utc();
    let items = discussions
        .iter()
        .map(|d| {
            let replies = responses.get(&d.id).map(Vec::as_slice).unwrap_or(&[]);
            mapping::for_list(d, authors.get(&d.user_id), replies, now)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(items))
}

/// GET /api/v1/discussions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiscussionToReturn>> {
    let discussion = DiscussionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Discussion", id))?;
    let author = UserRepo::find_by_id(&state.pool, discussion.user_id).await?;
    let body = mapping::to_return(&discussion, author.as_ref(), state.clock.utc())?;
    Ok(Json(body))
}

/// PUT/PATCH /api/v1/discussions/{id}
///
/// Only the fields present in the body change. Moving a `Deleted`
/// discussion to any other status is refused with 409.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateDiscussion>,
) -> AppResult<Json<DiscussionToReturn>> {
    require_text_if_present("subject", input.subject.as_deref())?;

    let discussion = DiscussionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Discussion", id))?;
    let author = UserRepo::find_by_id(&state.pool, discussion.user_id).await?;
    let body = mapping::to_return(&discussion, author.as_ref(), state.clock.utc())?;
    Ok(Json(body))
}

/// DELETE /api/v1/discussions/{id}
///
/// Soft delete: the stored status becomes `Deleted`.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if DiscussionRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(discussion_id = id, "Discussion soft-deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Discussion", id))
    }
}

/// DELETE /api/v1/discussions/{id}/purge
///
/// Removes the row together with its responses, participants and
/// attachments.
pub async fn purge(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if DiscussionRepo::hard_delete(&state.pool, id).await? {
        tracing::info!(discussion_id = id, "Discussion purged");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Discussion", id))
    }
}
