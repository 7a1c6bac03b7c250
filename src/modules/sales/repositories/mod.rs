mod bigquery_source;
mod cached_source;
mod data_source;
mod in_memory_source;
mod mysql_source;
mod sql;
mod synthetic_source;

use std::sync::Arc;

pub use bigquery_source::{BigQueryAuth, BigQuerySalesSource};
pub use cached_source::CachedSalesSource;
pub use data_source::SalesDataSource;
pub use in_memory_source::InMemorySalesSource;
pub use mysql_source::MySqlSalesSource;
pub use synthetic_source::SyntheticSalesSource;

use crate::config::{BigQueryAuthConfig, DashboardConfig, DataSourceConfig};
use crate::core::{Clock, Result};

/// Build the configured data source
pub async fn data_source_from_config(
    config: &DataSourceConfig,
    dashboard: &DashboardConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn SalesDataSource>> {
    let source: Arc<dyn SalesDataSource> = match config {
        DataSourceConfig::Synthetic { seed, periods } => Arc::new(SyntheticSalesSource::new(
            clock,
            dashboard.granularity,
            *periods,
            *seed,
        )),
        DataSourceConfig::MySql {
            database,
            table,
            columns,
        } => {
            let pool = database.create_pool().await?;
            tracing::info!(
                "Warehouse pool initialized ({} connections)",
                database.max_connections
            );
            Arc::new(MySqlSalesSource::new(pool, table.clone(), columns.clone()))
        }
        DataSourceConfig::BigQuery(bq) => {
            let auth = match &bq.auth {
                BigQueryAuthConfig::ServiceAccount { credentials_file } => {
                    tracing::info!(
                        "BigQuery service account loaded from {}",
                        credentials_file.display()
                    );
                    BigQueryAuth::service_account(credentials_file)?
                }
                BigQueryAuthConfig::AccessToken(token) => {
                    tracing::warn!("BigQuery uses a static access token; it will not be renewed");
                    BigQueryAuth::AccessToken(token.clone())
                }
            };
            Arc::new(
                BigQuerySalesSource::new(
                    bq.base_url.clone(),
                    bq.project_id.clone(),
                    auth,
                    bq.table.clone(),
                )
                .with_columns(bq.columns.clone()),
            )
        }
    };

    Ok(source)
}
