//! Event entity model.

use serde::Serialize;
use sqlx::FromRow;
use chronicle_core::graph::TimelineElement;
use chronicle_core::timeline::{ElementType, Tone};
use chronicle_core::types::{DbId, Timestamp};

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: DbId,
    pub period_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub tone: Tone,
    pub position_x: f64,
    pub position_y: f64,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimelineElement for Event {
    const ELEMENT_TYPE: ElementType = ElementType::Event;

    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> DbId {
        self.period_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tone(&self) -> Tone {
        self.tone
    }

    fn position_x(&self) -> f64 {
        self.position_x
    }

    fn position_y(&self) -> f64 {
        self.position_y
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }
}
