//! Handlers for the `/work-items` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::mapping::work_item as mapping;
use forum_db::models::comment::Comment;
use forum_db::models::work_item::{
    CreateWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter, WorkItemForList, WorkItemToReturn,
};
use forum_db::repositories::{CommentRepo, UserRepo, WorkItemRepo};

use super::{check_initial_status, load_users, require_user};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::query::ListParams;
use crate::state::AppState;

async fn find(state: &AppState, id: DbId) -> AppResult<WorkItem> {
    WorkItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("WorkItem", id))
}

/// POST /api/v1/work-items
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateWorkItem>,
) -> AppResult<(StatusCode, Json<WorkItemToReturn>)> {
    require_text("subject", &input.subject)?;
    check_initial_status(input.status.as_deref())?;
    let author = require_user(&state.pool, input.user_id).await?;

    let work_item = WorkItemRepo::create(&state.pool, &mapping::new_work_item(&input)).await?;
    tracing::info!(work_item_id = work_item.id, "Work item created");

    let body = mapping::to_return(&work_item, Some(&author), state.clock.utc())?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/work-items
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<WorkItemForList>>> {
    let filter = WorkItemFilter {
        status: params.status(),
        include_deleted: params.include_deleted,
        limit: params.limit(),
        offset: params.offset(),
    };
    let work_items = WorkItemRepo::list(&state.pool, &filter).await?;

    let ids: Vec<DbId> = work_items.iter().map(|w| w.id).collect();
    let mut comments: HashMap<DbId, Vec<Comment>> = HashMap::new();
    for comment in CommentRepo::list_by_work_items(&state.pool, &ids).await? {
        comments.entry(comment.work_item_id).or_default().push(comment);
    }
    let authors = load_users(&state.pool, work_items.iter().map(|w| w.user_id)).await?;

    let now = state.clock.utc();
    let mut items = Vec::with_capacity(work_items.len());
    for work_item in &work_items {
        let thread = comments
            .get(&work_item.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        items.push(mapping::for_list(
            work_item,
            authors.get(&work_item.user_id),
            thread,
            now,
        )?);
    }
    Ok(Json(items))
}

/// GET /api/v1/work-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkItemToReturn>> {
    let work_item = find(&state, id).await?;
    let author = UserRepo::find_by_id(&state.pool, work_item.user_id).await?;
    Ok(Json(mapping::to_return(
        &work_item,
        author.as_ref(),
        state.clock.utc(),
    )?))
}

/// PUT/PATCH /api/v1/work-items/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateWorkItem>,
) -> AppResult<Json<WorkItemToReturn>> {
    require_text_if_present("subject", input.subject.as_deref())?;

    let work_item = WorkItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("WorkItem", id))?;
    let author = UserRepo::find_by_id(&state.pool, work_item.user_id).await?;
    Ok(Json(mapping::to_return(
        &work_item,
        author.as_ref(),
        state.clock.utc(),
    )?))
}

/// DELETE /api/v1/work-items/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !WorkItemRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::not_found("WorkItem", id));
    }
    tracing::info!(work_item_id = id, "Work item soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/work-items/{id}/purge
///
/// Refused with 409 while a relation still points at or from the item.
pub async fn purge(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !WorkItemRepo::hard_delete(&state.pool, id).await? {
        return Err(AppError::not_found("WorkItem", id));
    }
    tracing::info!(work_item_id = id, "Work item purged");
    Ok(StatusCode::NO_CONTENT)
}
