//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod element_repo;
pub mod event_repo;
pub mod game_repo;
pub mod ownership_repo;
pub mod period_repo;
pub mod scene_repo;

pub use element_repo::ElementRepo;
pub use event_repo::EventRepo;
pub use game_repo::GameRepo;
pub use ownership_repo::OwnershipRepo;
pub use period_repo::PeriodRepo;
pub use scene_repo::SceneRepo;
