//! Operations that apply to any timeline element, keyed by [`ElementType`].

use sqlx::PgPool;
use chronicle_core::timeline::ElementType;
use chronicle_core::types::DbId;

use crate::models::element::{ElementPosition, ElementRow};
use crate::repositories::ownership_repo::{owned_element_query, table_name};
use crate::repositories::{EventRepo, PeriodRepo, SceneRepo};

/// Provides type-dispatched reads and position updates for elements.
pub struct ElementRepo;

impl ElementRepo {
    /// Find any element by type and ID if its game belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        element_type: ElementType,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<ElementRow>, sqlx::Error> {
        let row = match element_type {
            ElementType::Period => PeriodRepo::find_owned(pool, id, user_id)
                .await?
                .map(ElementRow::Period),
            ElementType::Event => EventRepo::find_owned(pool, id, user_id)
                .await?
                .map(ElementRow::Event),
            ElementType::Scene => SceneRepo::find_owned(pool, id, user_id)
                .await?
                .map(ElementRow::Scene),
        };
        Ok(row)
    }

    /// Move an element on the canvas and optionally change its order index.
    ///
    /// The ownership check and the update run as one statement. Returns
    /// `false` when the element does not exist or is not owned by `user_id`.
    ///
    /// Repeating a call with the same arguments leaves the row unchanged,
    /// `updated_at` included: it only moves when a value actually changes.
    pub async fn update_position(
        pool: &PgPool,
        element_type: ElementType,
        id: DbId,
        user_id: &str,
        position: &ElementPosition,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET
                updated_at = CASE
                    WHEN (position_x, position_y, order_index)
                         IS DISTINCT FROM ($3, $4, COALESCE($5, order_index))
                    THEN NOW()
                    ELSE updated_at
                END,
                position_x = $3,
                position_y = $4,
                order_index = COALESCE($5, order_index)
             WHERE id IN ({guard})",
            table = table_name(element_type),
            guard = owned_element_query(element_type, 1, 2),
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .bind(position.position_x)
            .bind(position.position_y)
            .bind(position.order_index)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
