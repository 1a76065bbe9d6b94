//! Repository for the `events` table.

use sqlx::PgPool;
use chronicle_core::timeline::{ElementType, DEFAULT_ORDER_INDEX, DEFAULT_POSITION};
use chronicle_core::types::DbId;

use crate::models::element::CreateElement;
use crate::models::event::Event;
use crate::repositories::ownership_repo::owned_element_query;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, period_id, title, description, tone, position_x, position_y, \
                       order_index, created_at, updated_at";

/// Provides data access for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event under `period_id`, returning the created row.
    ///
    /// Ownership of the period must already have been checked.
    pub async fn create(
        pool: &PgPool,
        period_id: DbId,
        input: &CreateElement,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (period_id, title, description, tone, position_x, position_y, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(period_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.tone.as_str())
            .bind(input.position_x.unwrap_or(DEFAULT_POSITION))
            .bind(input.position_y.unwrap_or(DEFAULT_POSITION))
            .bind(input.order_index.unwrap_or(DEFAULT_ORDER_INDEX))
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID if its game belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE id IN ({})",
            owned_element_query(ElementType::Event, 1, 2)
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every event in a game, across all of its periods.
    ///
    /// Filtered through the `periods` table rather than trusting any client
    /// supplied period ids. Ordered by `order_index`, then id.
    pub async fn list_by_game(pool: &PgPool, game_id: DbId) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE period_id IN (SELECT id FROM periods WHERE game_id = $1)
             ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }
}
