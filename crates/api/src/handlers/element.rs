//! Handlers for periods, events and scenes.
//!
//! Creation is nested under the parent resource
//! (`/games/{id}/periods`, `/periods/{id}/events`, `/events/{id}/scenes`).
//! Reads and position updates go through `/elements/{id}` with an explicit
//! `elementType`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use chronicle_core::error::CoreError;
use chronicle_core::timeline::{
    normalize_description, validate_position, validate_title, ElementType, DEFAULT_POSITION,
};
use chronicle_core::types::DbId;
use chronicle_db::models::element::{CreateElement, ElementPosition, ElementRow};
use chronicle_db::models::event::Event;
use chronicle_db::models::period::Period;
use chronicle_db::models::scene::Scene;
use chronicle_db::repositories::{ElementRepo, EventRepo, OwnershipRepo, PeriodRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::caller::Caller;
use crate::state::AppState;

/// Query parameters for `GET /elements/{id}`.
#[derive(Debug, Deserialize)]
pub struct ElementQuery {
    #[serde(rename = "elementType")]
    pub element_type: String,
}

/// Request body for `PUT /elements/{id}/position`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionRequest {
    pub element_type: String,
    #[serde(flatten)]
    pub position: ElementPosition,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/games/{id}/periods
pub async fn create_period(
    caller: Caller,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    Json(input): Json<CreateElement>,
) -> AppResult<(StatusCode, Json<Period>)> {
    let input = validate_create(input)?;

    if !OwnershipRepo::is_game_owned_by(&state.pool, game_id, &caller.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        }));
    }

    let period = PeriodRepo::create(&state.pool, game_id, &input).await?;

    tracing::info!(
        period_id = period.id,
        game_id,
        user_id = %caller.user_id,
        "Period created",
    );

    Ok((StatusCode::CREATED, Json(period)))
}

/// POST /api/v1/periods/{id}/events
pub async fn create_event(
    caller: Caller,
    State(state): State<AppState>,
    Path(period_id): Path<DbId>,
    Json(input): Json<CreateElement>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let input = validate_create(input)?;
    ensure_owned(&state, ElementType::Period, period_id, &caller).await?;

    let event = EventRepo::create(&state.pool, period_id, &input).await?;

    tracing::info!(
        event_id = event.id,
        period_id,
        user_id = %caller.user_id,
        "Event created",
    );

    Ok((StatusCode::CREATED, Json(event)))
}

/// POST /api/v1/events/{id}/scenes
pub async fn create_scene(
    caller: Caller,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateElement>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    let input = validate_create(input)?;
    ensure_owned(&state, ElementType::Event, event_id, &caller).await?;

    let scene = SceneRepo::create(&state.pool, event_id, &input).await?;

    tracing::info!(
        scene_id = scene.id,
        event_id,
        user_id = %caller.user_id,
        "Scene created",
    );

    Ok((StatusCode::CREATED, Json(scene)))
}

// ---------------------------------------------------------------------------
// Read / position
// ---------------------------------------------------------------------------

/// GET /api/v1/elements/{id}?elementType=
pub async fn get_by_id(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ElementQuery>,
) -> AppResult<Json<ElementRow>> {
    let element_type: ElementType = params.element_type.parse()?;

    let row = ElementRepo::find_owned(&state.pool, element_type, id, &caller.user_id)
        .await?
        .ok_or_else(|| element_not_found(element_type, id))?;

    Ok(Json(row))
}

/// PUT /api/v1/elements/{id}/position
///
/// Persists a drag-release. Position is always overwritten; the order index
/// only when supplied. Idempotent.
pub async fn update_position(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePositionRequest>,
) -> AppResult<StatusCode> {
    let element_type: ElementType = input.element_type.parse()?;
    let position = input.position;
    validate_position(position.position_x, position.position_y)?;

    let updated =
        ElementRepo::update_position(&state.pool, element_type, id, &caller.user_id, &position)
            .await?;
    if !updated {
        return Err(element_not_found(element_type, id));
    }

    tracing::debug!(
        element_type = %element_type,
        element_id = id,
        x = position.position_x,
        y = position.position_y,
        order_index = ?position.order_index,
        "Element position updated",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn element_not_found(element_type: ElementType, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: element_type.entity_name(),
        id,
    })
}

/// Fail with not-found unless the element exists and belongs to the caller.
async fn ensure_owned(
    state: &AppState,
    element_type: ElementType,
    id: DbId,
    caller: &Caller,
) -> AppResult<()> {
    if OwnershipRepo::is_owned_by(&state.pool, element_type, id, &caller.user_id).await? {
        Ok(())
    } else {
        Err(element_not_found(element_type, id))
    }
}

/// Normalize a create payload: trimmed non-empty title, blank description
/// dropped, finite coordinates.
fn validate_create(input: CreateElement) -> AppResult<CreateElement> {
    validate_position(
        input.position_x.unwrap_or(DEFAULT_POSITION),
        input.position_y.unwrap_or(DEFAULT_POSITION),
    )?;

    Ok(CreateElement {
        title: validate_title(&input.title)?,
        description: normalize_description(input.description.as_deref()),
        ..input
    })
}
