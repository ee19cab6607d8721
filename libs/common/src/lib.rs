//! Common library for the Virtual Garden application
//!
//! This crate provides shared functionality used by the garden services,
//! including configuration, database connectivity, the domain models and the
//! store interface the request handlers persist through.
//!
//! ```rust,no_run
//! use garden_common::config::AppConfig;
//! use garden_common::database::{ensure_schema, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = init_pool(&config.database()).await?;
//!     ensure_schema(&pool).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod store;
