//! Domain types shared by the persistence and HTTP layers.
//!
//! This crate has no internal dependencies so the timeline rules and the
//! graph projector can be used (and tested) without a database.

pub mod error;
pub mod graph;
pub mod timeline;
pub mod types;
