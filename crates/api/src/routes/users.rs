//! Route definitions for `/users` and `/organization-types`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{organization_type, user};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route(
            "/{id}",
            get(user::get_by_id)
                .put(user::update)
                .patch(user::update)
                .delete(user::delete),
        )
}

/// Routes mounted at `/organization-types`. Same shape as `/users`.
pub fn organization_types_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(organization_type::list).post(organization_type::create),
        )
        .route(
            "/{id}",
            get(organization_type::get_by_id)
                .put(organization_type::update)
                .patch(organization_type::update)
                .delete(organization_type::delete),
        )
}
