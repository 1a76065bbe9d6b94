//! Handlers for the `/games` resource.
//!
//! Every handler scopes its query by the caller's user id. A game owned by
//! another user is reported exactly like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use chronicle_core::error::CoreError;
use chronicle_core::graph::{self, TimelineGraph};
use chronicle_core::timeline::{normalize_description, validate_title};
use chronicle_core::types::DbId;
use chronicle_db::models::game::{CreateGame, Game, GameList, GameWithElements, UpdateGame};
use chronicle_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::caller::Caller;
use crate::state::AppState;

/// Query parameters for the graph endpoint.
#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    /// Case-insensitive substring matched against titles and descriptions.
    pub search: Option<String>,
}

fn game_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Game", id })
}

/// POST /api/v1/games
pub async fn create(
    caller: Caller,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<(StatusCode, Json<Game>)> {
    let input = CreateGame {
        title: validate_title(&input.title)?,
        description: normalize_description(input.description.as_deref()),
    };

    let game = GameRepo::create(&state.pool, &caller.user_id, &input).await?;

    tracing::info!(game_id = game.id, user_id = %caller.user_id, "Game created");

    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /api/v1/games
pub async fn list(caller: Caller, State(state): State<AppState>) -> AppResult<Json<GameList>> {
    let games = GameRepo::list_by_user(&state.pool, &caller.user_id).await?;
    Ok(Json(GameList { games }))
}

/// GET /api/v1/games/{id}
///
/// The game plus every period, event and scene beneath it.
pub async fn get_by_id(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<GameWithElements>> {
    let aggregate = GameRepo::find_with_elements(&state.pool, id, &caller.user_id)
        .await?
        .ok_or_else(|| game_not_found(id))?;
    Ok(Json(aggregate))
}

/// PUT /api/v1/games/{id}
pub async fn update(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGame>,
) -> AppResult<Json<Game>> {
    // A blank description is kept as `Some` so the store clears the column.
    let input = UpdateGame {
        title: input.title.as_deref().map(validate_title).transpose()?,
        description: input.description,
    };

    let game = GameRepo::update(&state.pool, id, &caller.user_id, &input)
        .await?
        .ok_or_else(|| game_not_found(id))?;

    tracing::info!(game_id = id, user_id = %caller.user_id, "Game updated");

    Ok(Json(game))
}

/// DELETE /api/v1/games/{id}
///
/// Removes the game and its whole subtree.
pub async fn delete(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GameRepo::delete(&state.pool, id, &caller.user_id).await? {
        tracing::info!(game_id = id, user_id = %caller.user_id, "Game deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(game_not_found(id))
    }
}

/// GET /api/v1/games/{id}/graph
///
/// Canvas nodes and parent-to-child edges for the game, optionally narrowed
/// by `?search=`.
pub async fn get_graph(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<GraphQuery>,
) -> AppResult<Json<TimelineGraph>> {
    let aggregate = GameRepo::find_with_elements(&state.pool, id, &caller.user_id)
        .await?
        .ok_or_else(|| game_not_found(id))?;

    let projected = graph::project(&aggregate.periods, &aggregate.events, &aggregate.scenes);
    let projected = match params.search.as_deref() {
        Some(term) => graph::filter_nodes(projected, term),
        None => projected,
    };

    Ok(Json(projected))
}
