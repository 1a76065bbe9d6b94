//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes that entity supports
//!
//! JSON field names are camelCase.

pub mod element;
pub mod event;
pub mod game;
pub mod period;
pub mod scene;
