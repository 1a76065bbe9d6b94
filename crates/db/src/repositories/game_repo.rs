//! Repository for the `games` table.
//!
//! Every query is scoped by `user_id`: a game owned by someone else behaves
//! exactly like a game that does not exist.

use sqlx::PgPool;
use chronicle_core::types::DbId;

use crate::models::game::{CreateGame, Game, GameWithElements, UpdateGame};
use crate::repositories::{EventRepo, PeriodRepo, SceneRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, user_id, created_at, updated_at";

/// Provides CRUD operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreateGame,
    ) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a game by ID if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's games, most recently created first.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Load a game together with all of its periods, events and scenes.
    ///
    /// Returns `None` if the game does not exist or is not owned by
    /// `user_id`. The three child lists are read with separate queries and
    /// are not a consistent snapshot of each other.
    pub async fn find_with_elements(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<GameWithElements>, sqlx::Error> {
        let Some(game) = Self::find_owned(pool, id, user_id).await? else {
            return Ok(None);
        };

        let periods = PeriodRepo::list_by_game(pool, game.id).await?;
        let events = EventRepo::list_by_game(pool, game.id).await?;
        let scenes = SceneRepo::list_by_game(pool, game.id).await?;

        Ok(Some(GameWithElements {
            game,
            periods,
            events,
            scenes,
        }))
    }

    /// Update a game. Only non-`None` fields in `input` are applied, but
    /// `updated_at` is refreshed regardless. A supplied description is
    /// trimmed, and a blank one clears the column.
    ///
    /// Returns `None` if no game with the given `id` is owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                title = COALESCE($3, title),
                description = CASE WHEN $4::TEXT IS NULL THEN description
                                   ELSE NULLIF(btrim($4), '') END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a game and, through `ON DELETE CASCADE`, its whole subtree.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
