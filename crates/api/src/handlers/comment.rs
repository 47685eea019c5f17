//! Handlers for comments, nested under work items:
//! `/work-items/{work_item_id}/comments[/{id}]`

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::status::is_deleted;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::mapping::work_item as mapping;
use forum_db::models::comment::{Comment, CommentToReturn, CreateComment, UpdateComment};
use forum_db::models::entity_ref::ParentKind;
use forum_db::repositories::{CommentRepo, UserRepo};

use super::{check_initial_status, load_users, require_live_parent, require_parent, require_user};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::IncludeDeletedParams;
use crate::state::AppState;

async fn find(state: &AppState, work_item_id: DbId, id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(&state.pool, work_item_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))
}

async fn project(state: &AppState, comment: &Comment) -> AppResult<CommentToReturn> {
    let author = UserRepo::find_by_id(&state.pool, comment.user_id).await?;
    Ok(mapping::comment_to_return(comment, author.as_ref())?)
}

/// POST /api/v1/work-items/{work_item_id}/comments
pub async fn create(
    State(state): State<AppState>,
    Path(work_item_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentToReturn>)> {
    require_text("comment", &input.comment)?;
    check_initial_status(input.status.as_deref())?;
    require_live_parent(&state.pool, ParentKind::WorkItem, work_item_id).await?;
    let author = require_user(&state.pool, input.user_id).await?;

    let comment =
        CommentRepo::create(&state.pool, &mapping::new_comment(work_item_id, &input)).await?;
    tracing::info!(work_item_id, comment_id = comment.id, "Comment created");

    let body = mapping::comment_to_return(&comment, Some(&author))?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/work-items/{work_item_id}/comments
pub async fn list_by_work_item(
    State(state): State<AppState>,
    Path(work_item_id): Path<DbId>,
    Query(params): Query<IncludeDeletedParams>,
) -> AppResult<Json<Vec<CommentToReturn>>> {
    require_parent(&state.pool, ParentKind::WorkItem, work_item_id).await?;

    let mut comments = CommentRepo::list_by_work_item(&state.pool, work_item_id).await?;
    if !params.include_deleted {
        comments.retain(|c| !is_deleted(&c.status));
    }
    let authors = load_users(&state.pool, comments.iter().map(|c| c.user_id)).await?;

    let mut body = Vec::with_capacity(comments.len());
    for comment in &comments {
        body.push(mapping::comment_to_return(
            comment,
            authors.get(&comment.user_id),
        )?);
    }
    Ok(Json(body))
}

/// GET /api/v1/work-items/{work_item_id}/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((work_item_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<CommentToReturn>> {
    let comment = find(&state, work_item_id, id).await?;
    Ok(Json(project(&state, &comment).await?))
}

/// PUT/PATCH /api/v1/work-items/{work_item_id}/comments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((work_item_id, id)): Path<(DbId, DbId)>,
    ValidJson(input): ValidJson<UpdateComment>,
) -> AppResult<Json<CommentToReturn>> {
    require_text_if_present("comment", input.comment.as_deref())?;

    let comment = CommentRepo::update(&state.pool, work_item_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))?;
    Ok(Json(project(&state, &comment).await?))
}

/// DELETE /api/v1/work-items/{work_item_id}/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((work_item_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !CommentRepo::soft_delete(&state.pool, work_item_id, id).await? {
        return Err(AppError::not_found("Comment", id));
    }
    tracing::info!(work_item_id, comment_id = id, "Comment soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}
