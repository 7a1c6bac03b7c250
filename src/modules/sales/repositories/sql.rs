//! SELECT statements shared by the warehouse sources.
//!
//! Table and column names come from validated configuration; each
//! identifier is backtick-quoted so names like `bi-sndb` or reserved words
//! parse as identifiers.

use crate::config::SalesColumns;

/// `SELECT <col> AS <field>, ... FROM <table> ORDER BY period_key`
pub(crate) fn select_sales(columns: &SalesColumns, table: &str) -> String {
    let select_list = columns
        .aliases()
        .iter()
        .map(|(column, field)| format!("{} AS {}", quote_identifier(column), field))
        .collect::<Vec<_>>()
        .join(", ");

    format!("SELECT {} FROM {} ORDER BY period_key", select_list, table)
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name)
}

/// MySQL quotes each segment of `schema.table` on its own
pub(crate) fn quote_mysql_table(table: &str) -> String {
    table
        .split('.')
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// BigQuery accepts the whole `project.dataset.table` path in one quote
pub(crate) fn quote_bigquery_table(table: &str) -> String {
    quote_identifier(table)
}
