//! PostgreSQL-backed repositories

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::{PlantStore, UserStore};
use crate::database;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Plant, PlantFilter, PlantStatus, Role, User};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";

const PLANT_COLUMNS: &str = "id, owner_id, name, species, position_x, position_y, status, \
                             image_url, created_at, updated_at";

fn decode(err: sqlx::Error) -> DatabaseError {
    DatabaseError::Corrupt(err.to_string())
}

fn user_from_row(row: &PgRow) -> DatabaseResult<User> {
    let role: String = row.try_get("role").map_err(decode)?;

    Ok(User {
        id: row.try_get("id").map_err(decode)?,
        username: row.try_get("username").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        password_hash: row.try_get("password_hash").map_err(decode)?,
        role: role.parse::<Role>().map_err(DatabaseError::Corrupt)?,
        created_at: row.try_get("created_at").map_err(decode)?,
        updated_at: row.try_get("updated_at").map_err(decode)?,
    })
}

fn plant_from_row(row: &PgRow) -> DatabaseResult<Plant> {
    let status: String = row.try_get("status").map_err(decode)?;

    Ok(Plant {
        id: row.try_get("id").map_err(decode)?,
        owner_id: row.try_get("owner_id").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        species: row.try_get("species").map_err(decode)?,
        position_x: row.try_get("position_x").map_err(decode)?,
        position_y: row.try_get("position_y").map_err(decode)?,
        status: status
            .parse::<PlantStatus>()
            .map_err(DatabaseError::Corrupt)?,
        image_url: row.try_get("image_url").map_err(decode)?,
        created_at: row.try_get("created_at").map_err(decode)?,
        updated_at: row.try_get("updated_at").map_err(decode)?,
    })
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $2 LIMIT 1"
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(user_from_row).collect()
    }

    async fn save(&self, user: &User) -> DatabaseResult<User> {
        info!("Saving user: {}", user.id);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users ({USER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                updated_at = EXCLUDED.updated_at
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        user_from_row(&row)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        database::health_check(&self.pool).await
    }
}

/// Plant repository
#[derive(Clone)]
pub struct PlantRepository {
    pool: PgPool,
}

impl PlantRepository {
    /// Create a new plant repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlantStore for PlantRepository {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Plant>> {
        let row = sqlx::query(&format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.as_ref().map(plant_from_row).transpose()
    }

    async fn find(&self, filter: &PlantFilter) -> DatabaseResult<Vec<Plant>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PLANT_COLUMNS}
            FROM plants
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.owner_id)
        .bind(filter.status.map(|status| status.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(plant_from_row).collect()
    }

    async fn save(&self, plant: &Plant) -> DatabaseResult<Plant> {
        info!("Saving plant: {}", plant.id);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO plants ({PLANT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                species = EXCLUDED.species,
                position_x = EXCLUDED.position_x,
                position_y = EXCLUDED.position_y,
                status = EXCLUDED.status,
                image_url = EXCLUDED.image_url,
                updated_at = EXCLUDED.updated_at
            RETURNING {PLANT_COLUMNS}
            "#
        ))
        .bind(plant.id)
        .bind(plant.owner_id)
        .bind(&plant.name)
        .bind(&plant.species)
        .bind(plant.position_x)
        .bind(plant.position_y)
        .bind(plant.status.as_str())
        .bind(&plant.image_url)
        .bind(plant.created_at)
        .bind(plant.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        plant_from_row(&row)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting plant: {}", id);

        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
