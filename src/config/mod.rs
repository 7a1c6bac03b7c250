use crate::core::{AppError, Currency, Result};
use crate::modules::sales::models::Granularity;
use std::env;
use std::str::FromStr;

pub mod data_source;
pub mod database;
pub mod server;

pub use data_source::{BigQueryAuthConfig, BigQueryConfig, DataSourceConfig, SalesColumns};
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Variable lookup used while building the configuration
pub(crate) type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub data_source: DataSourceConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
    pub cors_allowed_origin: Option<String>,
}

/// What the dashboard shows and how
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    pub currency: Currency,
    pub granularity: Granularity,
    /// Seconds between background data refreshes; 0 fetches on every request
    pub refresh_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Sales".to_string(),
            currency: Currency::BRL,
            granularity: Granularity::Monthly,
            refresh_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_vars(&|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars(vars: &EnvLookup<'_>) -> Result<Self> {
        let config = Config {
            app: AppConfig {
                env: vars("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: vars("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                log_json: vars("LOG_FORMAT")
                    .map(|f| f.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
                cors_allowed_origin: vars("CORS_ALLOWED_ORIGIN").filter(|o| !o.is_empty()),
            },
            server: ServerConfig::from_vars(vars)?,
            dashboard: DashboardConfig {
                title: vars("DASHBOARD_TITLE").unwrap_or_else(|| "Sales".to_string()),
                currency: parse_var(vars, "DASHBOARD_CURRENCY", Currency::BRL)?,
                granularity: parse_var(vars, "DASHBOARD_GRANULARITY", Granularity::Monthly)?,
                refresh_secs: parse_var(vars, "DATA_REFRESH_SECS", 0)?,
            },
            data_source: DataSourceConfig::from_vars(vars)?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(AppError::configuration("SERVER_WORKERS must be greater than 0"));
        }

        if self.dashboard.title.trim().is_empty() {
            return Err(AppError::configuration("DASHBOARD_TITLE must not be empty"));
        }

        self.data_source.validate()
    }
}

/// Parse `key` with `T::from_str`, falling back to `default` when unset
pub(crate) fn parse_var<T: FromStr>(vars: &EnvLookup<'_>, key: &str, default: T) -> Result<T> {
    match vars(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

pub(crate) fn require_var(vars: &EnvLookup<'_>, key: &str) -> Result<String> {
    vars(key).ok_or_else(|| AppError::configuration(format!("{} not set", key)))
}
