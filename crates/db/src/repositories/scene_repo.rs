//! Repository for the `scenes` table.

use sqlx::PgPool;
use chronicle_core::timeline::{ElementType, DEFAULT_ORDER_INDEX, DEFAULT_POSITION};
use chronicle_core::types::DbId;

use crate::models::element::CreateElement;
use crate::models::scene::Scene;
use crate::repositories::ownership_repo::owned_element_query;

const COLUMNS: &str = "id, event_id, title, description, tone, position_x, position_y, \
                       order_index, created_at, updated_at";

/// Provides data access for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene under `event_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateElement,
    ) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes (event_id, title, description, tone, position_x, position_y, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(event_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.tone.as_str())
            .bind(input.position_x.unwrap_or(DEFAULT_POSITION))
            .bind(input.position_y.unwrap_or(DEFAULT_POSITION))
            .bind(input.order_index.unwrap_or(DEFAULT_ORDER_INDEX))
            .fetch_one(pool)
            .await
    }

    /// Find a scene by ID if its game belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes WHERE id IN ({})",
            owned_element_query(ElementType::Scene, 1, 2)
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every scene in a game, ordered by `order_index`, then id.
    pub async fn list_by_game(pool: &PgPool, game_id: DbId) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE event_id IN (
                 SELECT e.id FROM events e
                 JOIN periods p ON p.id = e.period_id
                 WHERE p.game_id = $1
             )
             ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
