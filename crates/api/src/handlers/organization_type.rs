//! Handlers for the `/organization-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::types::DbId;
use forum_core::validation::{require_text, require_text_if_present};
use forum_db::models::organization_type::{
    CreateOrganizationType, OrganizationType, UpdateOrganizationType,
};
use forum_db::repositories::OrganizationTypeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

/// POST /api/v1/organization-types
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateOrganizationType>,
) -> AppResult<(StatusCode, Json<OrganizationType>)> {
    require_text("type_label", &input.type_label)?;
    let org_type = OrganizationTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(org_type)))
}

/// GET /api/v1/organization-types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OrganizationType>>> {
    Ok(Json(OrganizationTypeRepo::list(&state.pool).await?))
}

/// GET /api/v1/organization-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrganizationType>> {
    let org_type = OrganizationTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("OrganizationType", id))?;
    Ok(Json(org_type))
}

/// PUT/PATCH /api/v1/organization-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateOrganizationType>,
) -> AppResult<Json<OrganizationType>> {
    require_text_if_present("type_label", input.type_label.as_deref())?;
    let org_type = OrganizationTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("OrganizationType", id))?;
    Ok(Json(org_type))
}

/// DELETE /api/v1/organization-types/{id}
///
/// Restricted: 409 while any participant references the type.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if OrganizationTypeRepo::delete(&state.pool, id).await? {
        tracing::info!(organization_type_id = id, "Organization type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("OrganizationType", id))
    }
}
