//! Shared application state.

use database::postgres::DatabaseConnection;

/// Cloned into each router; the connection pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
