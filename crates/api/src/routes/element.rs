//! Route definitions for periods, events, scenes and generic element access.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::element;
use crate::state::AppState;

/// Routes mounted at `/periods`.
///
/// ```text
/// POST   /{id}/events     -> create_event
/// ```
pub fn period_router() -> Router<AppState> {
    Router::new().route("/{id}/events", post(element::create_event))
}

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /{id}/scenes     -> create_scene
/// ```
pub fn event_router() -> Router<AppState> {
    Router::new().route("/{id}/scenes", post(element::create_scene))
}

/// Routes mounted at `/elements`.
///
/// ```text
/// GET    /{id}            -> get_by_id (?elementType=)
/// PUT    /{id}/position   -> update_position
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(element::get_by_id))
        .route("/{id}/position", put(element::update_position))
}
