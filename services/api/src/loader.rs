//! Resolves path-supplied ids into the records a request targets

use garden_common::models::{Plant, User};
use garden_common::store::{PlantStore, UserStore};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, Resource};

/// Read-only lookups of users and plants by id
#[derive(Clone)]
pub struct IdentityLoader {
    users: Arc<dyn UserStore>,
    plants: Arc<dyn PlantStore>,
}

impl IdentityLoader {
    pub fn new(users: Arc<dyn UserStore>, plants: Arc<dyn PlantStore>) -> Self {
        Self { users, plants }
    }

    /// Load a user; the password hash never serializes outward
    pub async fn load_user(&self, id: &str) -> ApiResult<User> {
        let id = parse_id(id, Resource::User)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::User))
    }

    pub async fn load_plant(&self, id: &str) -> ApiResult<Plant> {
        let id = parse_id(id, Resource::Plant)?;
        self.plants
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::Plant))
    }
}

/// An id that is not a UUID cannot name any stored record
fn parse_id(id: &str, resource: Resource) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|e| {
        debug!("Unparseable {} id '{}': {}", resource, id, e);
        ApiError::NotFound(resource)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_common::store::MemoryStore;

    fn loader(store: &MemoryStore) -> IdentityLoader {
        IdentityLoader::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_load_user_found_and_missing() {
        let store = MemoryStore::new();
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into());
        UserStore::save(&store, &user).await.unwrap();

        let loaded = loader(&store).load_user(&user.id.to_string()).await.unwrap();
        assert_eq!(loaded.id, user.id);

        let missing = loader(&store).load_user(&Uuid::new_v4().to_string()).await;
        assert!(matches!(missing, Err(ApiError::NotFound(Resource::User))));
    }

    #[tokio::test]
    async fn test_load_plant_with_garbage_id_is_not_found() {
        let store = MemoryStore::new();
        let result = loader(&store).load_plant("not-a-uuid").await;
        assert!(matches!(result, Err(ApiError::NotFound(Resource::Plant))));
    }
}
