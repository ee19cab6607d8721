//! Application state shared across handlers

use garden_auth::{JwtService, SecretHasher};
use garden_common::config::Environment;
use garden_common::store::{MemoryStore, PlantStore, UserStore};
use std::sync::Arc;

use crate::loader::IdentityLoader;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub plants: Arc<dyn PlantStore>,
    pub jwt_service: JwtService,
    pub hasher: SecretHasher,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        plants: Arc<dyn PlantStore>,
        jwt_service: JwtService,
        hasher: SecretHasher,
        environment: Environment,
    ) -> Self {
        Self {
            users,
            plants,
            jwt_service,
            hasher,
            environment,
        }
    }

    /// State backed by a single in-memory store
    pub fn in_memory(
        store: MemoryStore,
        jwt_service: JwtService,
        hasher: SecretHasher,
        environment: Environment,
    ) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store),
            jwt_service,
            hasher,
            environment,
        )
    }

    pub fn loader(&self) -> IdentityLoader {
        IdentityLoader::new(self.users.clone(), self.plants.clone())
    }
}
