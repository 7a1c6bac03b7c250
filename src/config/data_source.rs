use std::path::PathBuf;

use super::database::DatabaseConfig;
use super::{parse_var, require_var, EnvLookup};
use crate::core::{AppError, Result};

pub const DEFAULT_BIGQUERY_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Where sales records come from, selected by `DATA_SOURCE`
#[derive(Debug, Clone)]
pub enum DataSourceConfig {
    /// Seeded random history
    Synthetic { seed: u64, periods: u32 },
    /// Pre-aggregated table in a MySQL warehouse
    MySql {
        database: DatabaseConfig,
        table: String,
        columns: SalesColumns,
    },
    /// BigQuery `jobs.query` over REST
    BigQuery(BigQueryConfig),
}

#[derive(Debug, Clone)]
pub struct BigQueryConfig {
    pub project_id: String,
    pub auth: BigQueryAuthConfig,
    pub base_url: String,
    pub table: String,
    pub columns: SalesColumns,
}

/// How BigQuery requests are authorized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigQueryAuthConfig {
    /// Service-account key file; access tokens are minted and renewed from it
    ServiceAccount { credentials_file: PathBuf },
    /// Pre-issued OAuth access token, used as is until it expires
    AccessToken(String),
}

/// Warehouse column read into each sales record field.
///
/// Lets the source read tables whose columns are not named after the
/// fields, e.g. `ano_mes, aprovadas, qtd_transacoes, qtd_produto,
/// novos_clientes, reembolso`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesColumns {
    pub period_key: String,
    pub approved_amount: String,
    pub transaction_count: String,
    pub units_sold: String,
    pub new_customers: String,
    pub refund_amount: String,
}

impl Default for SalesColumns {
    fn default() -> Self {
        Self {
            period_key: "period_key".to_string(),
            approved_amount: "approved_amount".to_string(),
            transaction_count: "transaction_count".to_string(),
            units_sold: "units_sold".to_string(),
            new_customers: "new_customers".to_string(),
            refund_amount: "refund_amount".to_string(),
        }
    }
}

impl SalesColumns {
    fn from_vars(vars: &EnvLookup<'_>) -> Self {
        let defaults = Self::default();
        let column = |key: &str, default: String| vars(key).filter(|c| !c.is_empty()).unwrap_or(default);

        Self {
            period_key: column("SALES_COLUMN_PERIOD_KEY", defaults.period_key),
            approved_amount: column("SALES_COLUMN_APPROVED_AMOUNT", defaults.approved_amount),
            transaction_count: column("SALES_COLUMN_TRANSACTION_COUNT", defaults.transaction_count),
            units_sold: column("SALES_COLUMN_UNITS_SOLD", defaults.units_sold),
            new_customers: column("SALES_COLUMN_NEW_CUSTOMERS", defaults.new_customers),
            refund_amount: column("SALES_COLUMN_REFUND_AMOUNT", defaults.refund_amount),
        }
    }

    /// `(source column, field name)` pairs in select order
    pub fn aliases(&self) -> [(&str, &'static str); 6] {
        [
            (self.period_key.as_str(), "period_key"),
            (self.approved_amount.as_str(), "approved_amount"),
            (self.transaction_count.as_str(), "transaction_count"),
            (self.units_sold.as_str(), "units_sold"),
            (self.new_customers.as_str(), "new_customers"),
            (self.refund_amount.as_str(), "refund_amount"),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (column, field) in self.aliases() {
            let valid = !column.is_empty()
                && column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(AppError::configuration(format!(
                    "Invalid column name '{}' for {}",
                    column, field
                )));
            }
        }
        Ok(())
    }
}

impl BigQueryAuthConfig {
    fn from_vars(vars: &EnvLookup<'_>) -> Result<Self> {
        let credentials_file = vars("BIGQUERY_CREDENTIALS_FILE")
            .or_else(|| vars("GOOGLE_APPLICATION_CREDENTIALS"))
            .filter(|path| !path.is_empty());

        if let Some(path) = credentials_file {
            return Ok(BigQueryAuthConfig::ServiceAccount {
                credentials_file: PathBuf::from(path),
            });
        }

        match vars("BIGQUERY_ACCESS_TOKEN").filter(|token| !token.is_empty()) {
            Some(token) => Ok(BigQueryAuthConfig::AccessToken(token)),
            None => Err(AppError::configuration(
                "BIGQUERY_CREDENTIALS_FILE or BIGQUERY_ACCESS_TOKEN not set",
            )),
        }
    }
}

impl DataSourceConfig {
    pub(crate) fn from_vars(vars: &EnvLookup<'_>) -> Result<Self> {
        let kind = vars("DATA_SOURCE").unwrap_or_else(|| "synthetic".to_string());

        match kind.to_lowercase().as_str() {
            "synthetic" => Ok(DataSourceConfig::Synthetic {
                seed: parse_var(vars, "SYNTHETIC_SEED", 42)?,
                periods: parse_var(vars, "SYNTHETIC_PERIODS", 12)?,
            }),
            "mysql" => Ok(DataSourceConfig::MySql {
                database: DatabaseConfig::from_vars(vars)?,
                table: vars("SALES_TABLE").unwrap_or_else(|| "monthly_sales".to_string()),
                columns: SalesColumns::from_vars(vars),
            }),
            "bigquery" => Ok(DataSourceConfig::BigQuery(BigQueryConfig {
                project_id: require_var(vars, "BIGQUERY_PROJECT_ID")?,
                auth: BigQueryAuthConfig::from_vars(vars)?,
                base_url: vars("BIGQUERY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BIGQUERY_BASE_URL.to_string()),
                table: require_var(vars, "BIGQUERY_TABLE")?,
                columns: SalesColumns::from_vars(vars),
            })),
            other => Err(AppError::configuration(format!(
                "Invalid DATA_SOURCE '{}' (expected synthetic, mysql or bigquery)",
                other
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            DataSourceConfig::Synthetic { periods, .. } => {
                if *periods == 0 {
                    return Err(AppError::configuration(
                        "SYNTHETIC_PERIODS must be greater than 0",
                    ));
                }
            }
            DataSourceConfig::MySql {
                table,
                database,
                columns,
            } => {
                validate_table_name(table)?;
                columns.validate()?;
                if database.max_connections == 0 || database.pool_size > database.max_connections {
                    return Err(AppError::configuration(
                        "DATABASE_POOL_SIZE must not exceed DATABASE_MAX_CONNECTIONS",
                    ));
                }
            }
            DataSourceConfig::BigQuery(bq) => {
                validate_table_name(&bq.table)?;
                bq.columns.validate()?;
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DataSourceConfig::Synthetic { .. } => "synthetic",
            DataSourceConfig::MySql { .. } => "mysql",
            DataSourceConfig::BigQuery(_) => "bigquery",
        }
    }
}

/// Table names are interpolated into SQL (backtick-quoted per segment), so
/// only dotted identifiers pass. Dashes are allowed for BigQuery project ids.
pub fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table.split('.').all(|segment| !segment.is_empty())
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid {
        Ok(())
    } else {
        Err(AppError::configuration(format!("Invalid table name '{}'", table)))
    }
}
