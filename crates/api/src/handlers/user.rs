//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::models::user::{CreateUser, UpdateUser, User};
use forum_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    require_text("display_name", &input.display_name)?;
    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(user))
}

/// PUT/PATCH /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateUser>,
) -> AppResult<Json<User>> {
    require_text_if_present("display_name", input.display_name.as_deref())?;
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
///
/// 409 while the user still authors a discussion, response, work item or
/// comment.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
