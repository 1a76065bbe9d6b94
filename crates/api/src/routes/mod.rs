pub mod element;
pub mod game;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                           list, create
/// /games/{id}                      get (with elements), update, delete
/// /games/{id}/graph                canvas graph (?search=)
/// /games/{id}/periods              create period
///
/// /periods/{id}/events             create event
/// /events/{id}/scenes              create scene
///
/// /elements/{id}                   get (?elementType=)
/// /elements/{id}/position          update position (PUT)
/// ```
///
/// Every route requires a caller identity (`x-user-id` header or `userId`
/// query parameter).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", game::router())
        .nest("/periods", element::period_router())
        .nest("/events", element::event_router())
        .nest("/elements", element::router())
}
