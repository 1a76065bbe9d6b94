//! Timeline element classification and field rules.
//!
//! A game owns a fixed three-level tree of elements: periods, events under
//! periods, and scenes under events. Every element carries a [`Tone`], a
//! canvas position and an order index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Canvas coordinate stored when the client supplies none.
pub const DEFAULT_POSITION: f64 = 0.0;

/// Order index stored when the client supplies none.
pub const DEFAULT_ORDER_INDEX: i32 = 0;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Display classification of an element. Has no behavioural effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Dark,
    Light,
}

impl Tone {
    /// All tones, in display order.
    pub const ALL: [Tone; 2] = [Tone::Dark, Tone::Light];

    /// The value stored in the `tone` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(CoreError::Validation(format!(
                "Invalid tone '{other}'. Must be one of: dark, light"
            ))),
        }
    }
}

/// Used when decoding the `tone` TEXT column.
impl TryFrom<String> for Tone {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Element type
// ---------------------------------------------------------------------------

/// The three element levels below a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Period,
    Event,
    Scene,
}

impl ElementType {
    /// All element types, root-most first.
    pub const ALL: [ElementType; 3] = [
        ElementType::Period,
        ElementType::Event,
        ElementType::Scene,
    ];

    /// Lowercase tag used on the wire and in graph node ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Period => "period",
            Self::Event => "event",
            Self::Scene => "scene",
        }
    }

    /// Entity name reported in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Period => "Period",
            Self::Event => "Event",
            Self::Scene => "Scene",
        }
    }

    /// The element level directly above this one. `None` means the parent
    /// is the game itself.
    pub fn parent(self) -> Option<ElementType> {
        match self {
            Self::Period => None,
            Self::Event => Some(Self::Period),
            Self::Scene => Some(Self::Event),
        }
    }

    /// The element level directly below this one, if any.
    pub fn child(self) -> Option<ElementType> {
        match self {
            Self::Period => Some(Self::Event),
            Self::Event => Some(Self::Scene),
            Self::Scene => None,
        }
    }

    /// Number of parent hops from this level up to the owning game.
    pub fn depth(self) -> usize {
        match self.parent() {
            None => 1,
            Some(parent) => parent.depth() + 1,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "period" => Ok(Self::Period),
            "event" => Ok(Self::Event),
            "scene" => Ok(Self::Scene),
            other => Err(CoreError::Validation(format!(
                "Invalid element type '{other}'. Must be one of: period, event, scene"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Trim a title and reject it if nothing is left.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as NULL.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Any finite coordinate pair is accepted; no range checks.
pub fn validate_position(x: f64, y: f64) -> Result<(), CoreError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "position ({x}, {y}) must be finite"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
