//! Request extractors shared by handlers.
//!
//! - [`caller::Caller`] -- The user id a request acts on behalf of.

pub mod caller;
