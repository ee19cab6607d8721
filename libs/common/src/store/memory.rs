//! In-memory store for tests and local runs
//!
//! Users and plants share one lock so that uniqueness checks and the
//! cascade from a deleted user to its plants behave like the SQL schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{PlantStore, UserStore};
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Plant, PlantFilter, User};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    plants: HashMap<Uuid, Plant>,
}

/// In-memory implementation of both store traits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> DatabaseResult<T> {
        let guard = self
            .inner
            .read()
            .map_err(|_| DatabaseError::Configuration("memory store lock poisoned".into()))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Collections) -> DatabaseResult<T>,
    ) -> DatabaseResult<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| DatabaseError::Configuration("memory store lock poisoned".into()))?;
        f(&mut guard)
    }
}

fn newest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    records
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        self.read(|c| c.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        self.read(|c| c.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DatabaseResult<Option<User>> {
        self.read(|c| {
            c.users
                .values()
                .find(|u| u.username == username || u.email == email)
                .cloned()
        })
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let users = self.read(|c| c.users.values().cloned().collect::<Vec<_>>())?;
        Ok(newest_first(users, |u| u.created_at))
    }

    async fn save(&self, user: &User) -> DatabaseResult<User> {
        self.write(|c| {
            let clash = c.users.values().find(|other| {
                other.id != user.id && (other.username == user.username || other.email == user.email)
            });
            if let Some(other) = clash {
                let constraint = if other.username == user.username {
                    "users_username_key"
                } else {
                    "users_email_key"
                };
                return Err(DatabaseError::Conflict(constraint.to_string()));
            }

            c.users.insert(user.id, user.clone());
            Ok(user.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        self.write(|c| {
            let removed = c.users.remove(&id).is_some();
            if removed {
                c.plants.retain(|_, plant| plant.owner_id != id);
            }
            Ok(removed)
        })
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        self.read(|_| true)
    }
}

#[async_trait]
impl PlantStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Plant>> {
        self.read(|c| c.plants.get(&id).cloned())
    }

    async fn find(&self, filter: &PlantFilter) -> DatabaseResult<Vec<Plant>> {
        let plants = self.read(|c| {
            c.plants
                .values()
                .filter(|plant| filter.matches(plant))
                .cloned()
                .collect::<Vec<_>>()
        })?;
        Ok(newest_first(plants, |p| p.created_at))
    }

    async fn save(&self, plant: &Plant) -> DatabaseResult<Plant> {
        self.write(|c| {
            if !c.users.contains_key(&plant.owner_id) {
                return Err(DatabaseError::MissingReference(
                    "plants_owner_id_fkey".to_string(),
                ));
            }
            c.plants.insert(plant.id, plant.clone());
            Ok(plant.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        self.write(|c| Ok(c.plants.remove(&id).is_some()))
    }
}
