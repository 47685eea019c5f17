//! Route definitions for the `/discussions` resource and its children.

use axum::routing::{delete, get};
use axum::Router;
use forum_db::models::entity_ref::ParentKind;

use super::{attachment_routes, participant_routes};
use crate::handlers::{discussion, response};
use crate::state::AppState;

/// Routes mounted at `/discussions`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
/// GET    /{discussion_id}                       -> get_by_id
/// PUT    /{discussion_id}                       -> update
/// PATCH  /{discussion_id}                       -> update
/// DELETE /{discussion_id}                       -> delete (soft)
/// DELETE /{discussion_id}/purge                 -> purge
///
/// GET    /{discussion_id}/responses             -> list_by_discussion
/// POST   /{discussion_id}/responses             -> create
/// GET    /{discussion_id}/responses/{id}        -> get_by_id
/// PUT    /{discussion_id}/responses/{id}        -> update
/// PATCH  /{discussion_id}/responses/{id}        -> update
/// DELETE /{discussion_id}/responses/{id}        -> delete (soft)
///
/// /{discussion_id}/participants[/{id}]          -> participant CRUD
/// /{discussion_id}/attachments[/{id}]           -> attachment CRUD
/// ```
pub fn router() -> Router<AppState> {
    let response_routes = Router::new()
        .route(
            "/",
            get(response::list_by_discussion).post(response::create),
        )
        .route(
            "/{id}",
            get(response::get_by_id)
                .put(response::update)
                .patch(response::update)
                .delete(response::delete),
        );

    Router::new()
        .route("/", get(discussion::list).post(discussion::create))
        .route(
            "/{discussion_id}",
            get(discussion::get_by_id)
                .put(discussion::update)
                .patch(discussion::update)
                .delete(discussion::delete),
        )
        .route("/{discussion_id}/purge", delete(discussion::purge))
        .nest("/{discussion_id}/responses", response_routes)
        .nest(
            "/{discussion_id}/participants",
            participant_routes(ParentKind::Discussion),
        )
        .nest(
            "/{discussion_id}/attachments",
            attachment_routes(ParentKind::Discussion),
        )
}
