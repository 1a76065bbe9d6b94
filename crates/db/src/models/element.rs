//! DTOs shared by periods, events and scenes.

use serde::{Deserialize, Serialize};
use chronicle_core::timeline::Tone;

use crate::models::event::Event;
use crate::models::period::Period;
use crate::models::scene::Scene;

/// DTO for creating a period, event or scene. The parent id comes from the
/// route; unset coordinates and order index default to 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateElement {
    pub title: String,
    pub description: Option<String>,
    pub tone: Tone,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub order_index: Option<i32>,
}

/// New canvas position for an element. `order_index` is kept when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPosition {
    pub position_x: f64,
    pub position_y: f64,
    pub order_index: Option<i32>,
}

/// Any one element row, serialized as the bare row.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ElementRow {
    Period(Period),
    Event(Event),
    Scene(Scene),
}
