use super::{parse_var, EnvLookup};
use crate::core::Result;

/// Server configuration for HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub(crate) fn from_vars(vars: &EnvLookup<'_>) -> Result<Self> {
        Ok(ServerConfig {
            host: vars("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(vars, "SERVER_PORT", 8080)?,
            workers: parse_var(vars, "SERVER_WORKERS", default_workers())?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
