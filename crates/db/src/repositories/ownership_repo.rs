//! Transitive ownership checks for timeline elements.
//!
//! No table below `games` stores its owner. An element belongs to a user
//! when the chain of parent foreign keys from the element's row ends at a
//! game whose `user_id` matches. The chain is one join for periods, two for
//! events and three for scenes; [`owned_element_query`] builds all of them
//! from [`ElementType::parent`].

use sqlx::PgPool;
use chronicle_core::timeline::ElementType;
use chronicle_core::types::DbId;

/// Table holding rows of the given element type.
pub fn table_name(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Period => "periods",
        ElementType::Event => "events",
        ElementType::Scene => "scenes",
    }
}

/// Foreign-key column pointing at the element's parent row.
pub fn parent_column(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Period => "game_id",
        ElementType::Event => "period_id",
        ElementType::Scene => "event_id",
    }
}

/// Build `SELECT t0.id ...` returning the element id when it exists and its
/// root game is owned by the given user, and no row otherwise.
///
/// `id_param` and `user_param` are the 1-based bind positions of the element
/// id and user id, so the query can be embedded as a sub-select in larger
/// statements.
pub fn owned_element_query(
    element_type: ElementType,
    id_param: usize,
    user_param: usize,
) -> String {
    let mut sql = format!("SELECT t0.id FROM {} t0", table_name(element_type));

    let mut current = element_type;
    let mut alias = 0;
    loop {
        let fk = parent_column(current);
        match current.parent() {
            Some(parent) => {
                let next = alias + 1;
                sql.push_str(&format!(
                    " JOIN {} t{next} ON t{next}.id = t{alias}.{fk}",
                    table_name(parent)
                ));
                alias = next;
                current = parent;
            }
            None => {
                sql.push_str(&format!(" JOIN games g ON g.id = t{alias}.{fk}"));
                break;
            }
        }
    }

    sql.push_str(&format!(
        " WHERE t0.id = ${id_param} AND g.user_id = ${user_param}"
    ));
    sql
}

/// Ownership guard shared by every element operation.
pub struct OwnershipRepo;

impl OwnershipRepo {
    /// Whether the element exists and its root game belongs to `user_id`.
    ///
    /// A missing element and an element owned by someone else both yield
    /// `false`.
    pub async fn is_owned_by(
        pool: &PgPool,
        element_type: ElementType,
        id: DbId,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS ({})",
            owned_element_query(element_type, 1, 2)
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Whether the game exists and belongs to `user_id`.
    pub async fn is_game_owned_by(
        pool: &PgPool,
        game_id: DbId,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM games WHERE id = $1 AND user_id = $2)",
        )
        .bind(game_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
