//! Route definitions for the `/work-items` resource and its children.

use axum::routing::{delete, get};
use axum::Router;
use forum_db::models::entity_ref::ParentKind;

use super::{attachment_routes, participant_routes};
use crate::handlers::{comment, relation, work_item};
use crate::state::AppState;

/// Routes mounted at `/work-items`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
/// GET    /{work_item_id}                        -> get_by_id
/// PUT    /{work_item_id}                        -> update
/// PATCH  /{work_item_id}                        -> update
/// DELETE /{work_item_id}                        -> delete (soft)
/// DELETE /{work_item_id}/purge                  -> purge
///
/// /{work_item_id}/comments[/{id}]               -> comment CRUD
/// /{work_item_id}/participants[/{id}]           -> participant CRUD
/// /{work_item_id}/documents[/{id}]              -> document CRUD
///
/// GET    /{work_item_id}/relations              -> list_for_work_item
/// POST   /{work_item_id}/relations              -> create
/// ```
pub fn router() -> Router<AppState> {
    let comment_routes = Router::new()
        .route("/", get(comment::list_by_work_item).post(comment::create))
        .route(
            "/{id}",
            get(comment::get_by_id)
                .put(comment::update)
                .patch(comment::update)
                .delete(comment::delete),
        );

    Router::new()
        .route("/", get(work_item::list).post(work_item::create))
        .route(
            "/{work_item_id}",
            get(work_item::get_by_id)
                .put(work_item::update)
                .patch(work_item::update)
                .delete(work_item::delete),
        )
        .route("/{work_item_id}/purge", delete(work_item::purge))
        .route(
            "/{work_item_id}/relations",
            get(relation::list_for_work_item).post(relation::create),
        )
        .nest("/{work_item_id}/comments", comment_routes)
        .nest(
            "/{work_item_id}/participants",
            participant_routes(ParentKind::WorkItem),
        )
        .nest(
            "/{work_item_id}/documents",
            attachment_routes(ParentKind::WorkItem),
        )
}

/// Routes mounted at `/relations`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn relations_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(relation::get_by_id)
            .put(relation::update)
            .patch(relation::update)
            .delete(relation::delete),
    )
}
