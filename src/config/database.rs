use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use super::{parse_var, require_var, EnvLookup};
use crate::core::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub(crate) fn from_vars(vars: &EnvLookup<'_>) -> Result<Self> {
        Ok(DatabaseConfig {
            url: require_var(vars, "DATABASE_URL")?,
            pool_size: parse_var(vars, "DATABASE_POOL_SIZE", 2)?,
            max_connections: parse_var(vars, "DATABASE_MAX_CONNECTIONS", 5)?,
        })
    }

    /// Create a MySQL connection pool
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }
}
