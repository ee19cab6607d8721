//! Store interface consumed by the request handlers
//!
//! Each save or delete is a single atomic document operation. No multi-record
//! transactions are offered, so concurrent writers to the same record are
//! last-writer-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseResult;
use crate::models::{Plant, PlantFilter, User};

pub use memory::MemoryStore;
pub use postgres::{PlantRepository, UserRepository};

/// Persistence of user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Find any user holding either the username or the email
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DatabaseResult<Option<User>>;

    /// All users, newest first
    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    /// Insert or replace a user by id
    async fn save(&self, user: &User) -> DatabaseResult<User>;

    /// Remove a user and the plants it owns; false when nothing was removed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;
}

/// Persistence of plants
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Find a plant by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Plant>>;

    /// Plants matching the filter, newest first
    async fn find(&self, filter: &PlantFilter) -> DatabaseResult<Vec<Plant>>;

    /// Insert or replace a plant by id
    async fn save(&self, plant: &Plant) -> DatabaseResult<Plant>;

    /// Remove a plant; false when nothing was removed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;
}
