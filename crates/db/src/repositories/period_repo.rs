//! Repository for the `periods` table.

use sqlx::PgPool;
use chronicle_core::timeline::{ElementType, DEFAULT_ORDER_INDEX, DEFAULT_POSITION};
use chronicle_core::types::DbId;

use crate::models::element::CreateElement;
use crate::models::period::Period;
use crate::repositories::ownership_repo::owned_element_query;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, title, description, tone, position_x, position_y, \
                       order_index, created_at, updated_at";

/// Provides data access for periods.
pub struct PeriodRepo;

impl PeriodRepo {
    /// Insert a new period under `game_id`, returning the created row.
    ///
    /// Ownership of the game must already have been checked.
    pub async fn create(
        pool: &PgPool,
        game_id: DbId,
        input: &CreateElement,
    ) -> Result<Period, sqlx::Error> {
        let query = format!(
            "INSERT INTO periods (game_id, title, description, tone, position_x, position_y, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Period>(&query)
            .bind(game_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.tone.as_str())
            .bind(input.position_x.unwrap_or(DEFAULT_POSITION))
            .bind(input.position_y.unwrap_or(DEFAULT_POSITION))
            .bind(input.order_index.unwrap_or(DEFAULT_ORDER_INDEX))
            .fetch_one(pool)
            .await
    }

    /// Find a period by ID if its game belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Period>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM periods WHERE id IN ({})",
            owned_element_query(ElementType::Period, 1, 2)
        );
        sqlx::query_as::<_, Period>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all periods of a game ordered by `order_index`, then id.
    pub async fn list_by_game(pool: &PgPool, game_id: DbId) -> Result<Vec<Period>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM periods WHERE game_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Period>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
