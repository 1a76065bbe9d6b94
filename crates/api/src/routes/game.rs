//! Route definitions for the `/games` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{element, game};
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/graph      -> get_graph
/// POST   /{id}/periods    -> element::create_period
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(game::list).post(game::create))
        .route(
            "/{id}",
            get(game::get_by_id).put(game::update).delete(game::delete),
        )
        .route("/{id}/graph", get(game::get_graph))
        .route("/{id}/periods", post(element::create_period))
}
