//! Garden domain models

pub mod plant;
pub mod role;
pub mod user;

// Re-export for convenience
pub use plant::{Plant, PlantFilter, PlantStatus};
pub use role::Role;
pub use user::User;

use uuid::Uuid;

/// A record that belongs to exactly one user
pub trait Owned {
    /// Id of the user owning this record
    fn owner_id(&self) -> Uuid;
}
