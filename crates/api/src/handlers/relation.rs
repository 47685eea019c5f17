//! Handlers for relations between work items.
//!
//! Created and listed through the source work item
//! (`/work-items/{work_item_id}/relations`); addressed directly afterwards
//! (`/relations/{id}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use forum_core::types::DbId;
use forum_core::validation::validate_relation_endpoints;
use forum_db::mapping::work_item::new_relation;
use forum_db::models::entity_ref::ParentKind;
use forum_db::models::relation::{CreateRelation, Relation, UpdateRelation};
use forum_db::repositories::RelationRepo;

use super::require_parent;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

/// POST /api/v1/work-items/{work_item_id}/relations
///
/// The path names the source item. Both endpoints must exist and differ.
pub async fn create(
    State(state): State<AppState>,
    Path(work_item_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateRelation>,
) -> AppResult<(StatusCode, Json<Relation>)> {
    validate_relation_endpoints(work_item_id, input.to_work_item_id)?;
    require_parent(&state.pool, ParentKind::WorkItem, work_item_id).await?;
    require_parent(&state.pool, ParentKind::WorkItem, input.to_work_item_id).await?;

    let relation = RelationRepo::create(&state.pool, &new_relation(work_item_id, &input)).await?;
    tracing::info!(
        relation_id = relation.id,
        from = relation.from_work_item_id,
        to = relation.to_work_item_id,
        "Relation created"
    );
    Ok((StatusCode::CREATED, Json(relation)))
}

/// GET /api/v1/work-items/{work_item_id}/relations
///
/// Both directions: edges leaving and edges entering the item.
pub async fn list_for_work_item(
    State(state): State<AppState>,
    Path(work_item_id): Path<DbId>,
) -> AppResult<Json<Vec<Relation>>> {
    require_parent(&state.pool, ParentKind::WorkItem, work_item_id).await?;
    let relations = RelationRepo::list_for_work_item(&state.pool, work_item_id).await?;
    Ok(Json(relations))
}

/// GET /api/v1/relations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Relation>> {
    let relation = RelationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Relation", id))?;
    Ok(Json(relation))
}

/// PUT/PATCH /api/v1/relations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateRelation>,
) -> AppResult<Json<Relation>> {
    let relation = RelationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Relation", id))?;
    Ok(Json(relation))
}

/// DELETE /api/v1/relations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if RelationRepo::delete(&state.pool, id).await? {
        tracing::info!(relation_id = id, "Relation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Relation", id))
    }
}
