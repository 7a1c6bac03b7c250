use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use super::data_source::SalesDataSource;
use super::sql::{quote_mysql_table, select_sales};
use crate::config::SalesColumns;
use crate::core::{AppError, Result};
use crate::modules::sales::models::SalesRecord;

/// Row shape of the select, columns aliased to the field names
#[derive(Debug, sqlx::FromRow)]
struct SalesRow {
    period_key: String,
    approved_amount: Decimal,
    transaction_count: i64,
    units_sold: i64,
    new_customers: i64,
    refund_amount: Decimal,
}

impl TryFrom<SalesRow> for SalesRecord {
    type Error = AppError;

    fn try_from(row: SalesRow) -> Result<Self> {
        let period = row
            .period_key
            .parse()
            .map_err(|e: String| AppError::data_source(e))?;

        Ok(SalesRecord::new(
            period,
            row.approved_amount,
            row.transaction_count,
            row.units_sold,
            row.new_customers,
            row.refund_amount,
        ))
    }
}

/// Reads pre-aggregated sales from a MySQL warehouse table
pub struct MySqlSalesSource {
    pool: MySqlPool,
    table: String,
    columns: SalesColumns,
}

impl MySqlSalesSource {
    /// `table` and `columns` must already be validated as identifiers
    pub fn new(pool: MySqlPool, table: String, columns: SalesColumns) -> Self {
        Self {
            pool,
            table,
            columns,
        }
    }

    fn select_sql(&self) -> String {
        select_sales(&self.columns, &quote_mysql_table(&self.table))
    }
}

#[async_trait]
impl SalesDataSource for MySqlSalesSource {
    async fn fetch(&self) -> Result<Vec<SalesRecord>> {
        let sql = self.select_sql();
        let rows: Vec<SalesRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await?;

        info!(rows = rows.len(), table = %self.table, "Fetched warehouse sales rows");

        rows.into_iter().map(SalesRecord::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "mysql"
    }
}
