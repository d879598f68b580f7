//! PostgreSQL connection management for the workspace's services.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "profiles_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::DatabaseError;
