pub mod discussions;
pub mod health;
pub mod index;
pub mod users;
pub mod work_items;

use axum::routing::get;
use axum::{Extension, Router};
use forum_db::models::entity_ref::ParentKind;

use crate::handlers::{attachment, participant};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                            list, create
/// /users/{id}                                       get, update, delete
/// /organization-types                               list, create
/// /organization-types/{id}                          get, update, delete
///
/// /discussions                                      list, create
/// /discussions/{discussion_id}                      get, update, soft delete
/// /discussions/{discussion_id}/purge                hard delete
/// /discussions/{discussion_id}/responses[/{id}]     responses
/// /discussions/{discussion_id}/participants[/{id}]  participants
/// /discussions/{discussion_id}/attachments[/{id}]   attachments
///
/// /work-items                                       list, create
/// /work-items/{work_item_id}                        get, update, soft delete
/// /work-items/{work_item_id}/purge                  hard delete
/// /work-items/{work_item_id}/comments[/{id}]        comments
/// /work-items/{work_item_id}/participants[/{id}]    participants
/// /work-items/{work_item_id}/documents[/{id}]       documents
/// /work-items/{work_item_id}/relations              list, create
///
/// /relations/{id}                                   get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/organization-types", users::organization_types_router())
        .nest("/discussions", discussions::router())
        .nest("/work-items", work_items::router())
        .nest("/relations", work_items::relations_router())
}

/// Participant CRUD for one owner kind, mounted under that owner's id.
pub(crate) fn participant_routes(kind: ParentKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(participant::list_by_parent).post(participant::create),
        )
        .route(
            "/{id}",
            get(participant::get_by_id)
                .put(participant::update)
                .patch(participant::update)
                .delete(participant::delete),
        )
        .layer(Extension(kind))
}

/// Attachment (discussions) or document (work items) CRUD.
pub(crate) fn attachment_routes(kind: ParentKind) -> Router<AppState> {
    Router::new()
        .route("/", get(attachment::list_by_parent).post(attachment::create))
        .route(
            "/{id}",
            get(attachment::get_by_id)
                .put(attachment::update)
                .patch(attachment::update)
                .delete(attachment::delete),
        )
        .layer(Extension(kind))
}
