//! Game entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chronicle_core::types::{DbId, Timestamp};

use crate::models::event::Event;
use crate::models::period::Period;
use crate::models::scene::Scene;

/// A game row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub user_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new game. The owner comes from the caller identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating a game. Omitted fields keep their current value; an
/// empty `description` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A game with every period, event and scene beneath it.
///
/// Each list is ordered by `order_index`, ties broken by id.
#[derive(Debug, Clone, Serialize)]
pub struct GameWithElements {
    pub game: Game,
    pub periods: Vec<Period>,
    pub events: Vec<Event>,
    pub scenes: Vec<Scene>,
}

/// Response body for `GET /games`.
#[derive(Debug, Clone, Serialize)]
pub struct GameList {
    pub games: Vec<Game>,
}
