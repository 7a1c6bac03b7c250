use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::data_source::SalesDataSource;
use super::sql::{quote_bigquery_table, select_sales};
use crate::config::SalesColumns;
use crate::core::{AppError, Result};
use crate::modules::sales::models::SalesRecord;

const QUERY_TIMEOUT_MS: u64 = 30_000;
/// Polls and page requests allowed after the initial query
const MAX_RESULT_REQUESTS: usize = 100;

const BIGQUERY_SCOPE: &str = "https://www.googleapis.com/auth/bigquery";

/// Bearer token supplier for BigQuery requests
#[derive(Clone)]
pub enum BigQueryAuth {
    /// Fixed token; stops working once it expires
    AccessToken(String),
    /// Mints and renews tokens (service account, metadata server, ...)
    TokenProvider(Arc<dyn TokenProvider>),
}

impl BigQueryAuth {
    /// Token provider backed by a service-account key file
    pub fn service_account(credentials_file: &Path) -> Result<Self> {
        let account = CustomServiceAccount::from_file(credentials_file)?;
        Ok(BigQueryAuth::TokenProvider(Arc::new(account)))
    }

    async fn bearer_token(&self) -> Result<String> {
        match self {
            BigQueryAuth::AccessToken(token) => Ok(token.clone()),
            BigQueryAuth::TokenProvider(provider) => {
                let token = provider.token(&[BIGQUERY_SCOPE]).await?;
                Ok(token.as_str().to_string())
            }
        }
    }
}

/// Runs a standard-SQL query through the BigQuery REST `jobs.query` API,
/// following up with `jobs.getQueryResults` until every page is read
pub struct BigQuerySalesSource {
    client: Client,
    base_url: String,
    project_id: String,
    auth: BigQueryAuth,
    table: String,
    columns: SalesColumns,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    query: String,
    use_legacy_sql: bool,
    timeout_ms: u64,
}

/// Subset of the `jobs.query` / `jobs.getQueryResults` response this source reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResponse {
    #[serde(default)]
    job_complete: bool,
    job_reference: Option<JobReference>,
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
    page_token: Option<String>,
    total_rows: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    fields: Vec<TableField>,
}

#[derive(Debug, Deserialize)]
struct TableField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    v: serde_json::Value,
}

/// What a query result still needs after a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NextRequest {
    /// Job still running; ask for results again
    Poll,
    /// Another page is waiting under this token
    Page(String),
    Done,
}

/// Rows collected across every page of one query
#[derive(Debug, Default)]
pub(crate) struct QueryResult {
    schema: Option<TableSchema>,
    rows: Vec<TableRow>,
    total_rows: Option<u64>,
    complete: bool,
}

impl QueryResult {
    pub(crate) fn push(&mut self, page: QueryResponse) -> Result<NextRequest> {
        if !page.job_complete {
            return Ok(NextRequest::Poll);
        }

        if self.schema.is_none() {
            self.schema = page.schema;
        }
        if self.total_rows.is_none() {
            self.total_rows = page
                .total_rows
                .map(|raw| {
                    raw.parse::<u64>().map_err(|_| {
                        AppError::data_source(format!("Invalid BigQuery totalRows '{}'", raw))
                    })
                })
                .transpose()?;
        }
        self.rows.extend(page.rows);

        match page.page_token {
            Some(token) => Ok(NextRequest::Page(token)),
            None => {
                self.complete = true;
                Ok(NextRequest::Done)
            }
        }
    }

    /// Converts the collected rows, matching columns by name.
    ///
    /// Fails unless the last page has been pushed and the row count matches
    /// the reported total.
    pub(crate) fn into_records(self) -> Result<Vec<SalesRecord>> {
        if !self.complete {
            return Err(AppError::data_source(
                "BigQuery result is incomplete; remaining pages were not read",
            ));
        }
        if let Some(total) = self.total_rows {
            if total != self.rows.len() as u64 {
                return Err(AppError::data_source(format!(
                    "BigQuery returned {} of {} rows",
                    self.rows.len(),
                    total
                )));
            }
        }

        let schema = self
            .schema
            .ok_or_else(|| AppError::data_source("BigQuery response has no schema"))?;
        let columns: HashMap<&str, usize> = schema
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.as_str(), i))
            .collect();

        let column = |name: &str| -> Result<usize> {
            columns.get(name).copied().ok_or_else(|| {
                AppError::data_source(format!("BigQuery result lacks column '{}'", name))
            })
        };
        let period_idx = column("period_key")?;
        let approved_idx = column("approved_amount")?;
        let transactions_idx = column("transaction_count")?;
        let units_idx = column("units_sold")?;
        let customers_idx = column("new_customers")?;
        let refund_idx = column("refund_amount")?;

        self.rows
            .iter()
            .map(|row| -> Result<SalesRecord> {
                let period = cell_text(row, period_idx)?
                    .parse()
                    .map_err(|e: String| AppError::data_source(e))?;

                Ok(SalesRecord::new(
                    period,
                    cell_decimal(row, approved_idx)?,
                    cell_integer(row, transactions_idx)?,
                    cell_integer(row, units_idx)?,
                    cell_integer(row, customers_idx)?,
                    cell_decimal(row, refund_idx)?,
                ))
            })
            .collect()
    }
}

impl BigQuerySalesSource {
    pub fn new(base_url: String, project_id: String, auth: BigQueryAuth, table: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            auth,
            table,
            columns: SalesColumns::default(),
        }
    }

    /// Read the fields from differently named table columns
    pub fn with_columns(mut self, columns: SalesColumns) -> Self {
        self.columns = columns;
        self
    }

    fn query_sql(&self) -> String {
        select_sales(&self.columns, &quote_bigquery_table(&self.table))
    }

    async fn start_query(&self, token: &str) -> Result<QueryResponse> {
        let url = format!("{}/projects/{}/queries", self.base_url, self.project_id);
        let request = QueryRequest {
            query: self.query_sql(),
            use_legacy_sql: false,
            timeout_ms: QUERY_TIMEOUT_MS,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        read_query_response(response).await
    }

    async fn query_results(
        &self,
        token: &str,
        job: &JobReference,
        page_token: Option<&str>,
    ) -> Result<QueryResponse> {
        let url = format!(
            "{}/projects/{}/queries/{}",
            self.base_url, self.project_id, job.job_id
        );

        let mut params: Vec<(&str, String)> = vec![("timeoutMs", QUERY_TIMEOUT_MS.to_string())];
        if let Some(location) = &job.location {
            params.push(("location", location.clone()));
        }
        if let Some(page_token) = page_token {
            params.push(("pageToken", page_token.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        read_query_response(response).await
    }
}

#[async_trait]
impl SalesDataSource for BigQuerySalesSource {
    async fn fetch(&self) -> Result<Vec<SalesRecord>> {
        let token = self.auth.bearer_token().await?;

        let first = self.start_query(&token).await?;
        let job = first.job_reference.clone();
        let mut result = QueryResult::default();
        let mut next = result.push(first)?;
        let mut requests = 0;

        while next != NextRequest::Done {
            if requests == MAX_RESULT_REQUESTS {
                return Err(AppError::data_source(format!(
                    "BigQuery result still incomplete after {} requests",
                    MAX_RESULT_REQUESTS
                )));
            }
            requests += 1;

            let job = job
                .as_ref()
                .ok_or_else(|| AppError::data_source("BigQuery response has no job reference"))?;
            let page_token = match &next {
                NextRequest::Page(token) => Some(token.as_str()),
                _ => None,
            };
            debug!(job_id = %job.job_id, page = page_token.is_some(), "Requesting BigQuery results");

            let page = self.query_results(&token, job, page_token).await?;
            next = result.push(page)?;
        }

        let records = result.into_records()?;
        info!(
            rows = records.len(),
            follow_up_requests = requests,
            table = %self.table,
            "Fetched BigQuery sales rows"
        );
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        let token = self.auth.bearer_token().await?;
        let url = format!(
            "{}/projects/{}/datasets?maxResults=1",
            self.base_url, self.project_id
        );
        let response = self.client.get(&url).bearer_auth(&token).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::data_source(format!(
                "BigQuery ping failed: {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "bigquery"
    }
}

async fn read_query_response(response: Response) -> Result<QueryResponse> {
    if !response.status().is_success() {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();
        return Err(AppError::data_source(format!(
            "BigQuery query failed {}: {}",
            status, error_body
        )));
    }

    Ok(response.json().await?)
}

fn cell_text(row: &TableRow, idx: usize) -> Result<&str> {
    row.f
        .get(idx)
        .and_then(|cell| cell.v.as_str())
        .ok_or_else(|| AppError::data_source(format!("Missing value in column {}", idx)))
}

// NULL numeric cells count as zero
fn cell_decimal(row: &TableRow, idx: usize) -> Result<Decimal> {
    match row.f.get(idx).map(|cell| &cell.v) {
        Some(serde_json::Value::String(raw)) => Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| AppError::data_source(format!("Invalid decimal '{}'", raw))),
        Some(serde_json::Value::Null) | None => Ok(Decimal::ZERO),
        Some(other) => Err(AppError::data_source(format!("Invalid decimal {}", other))),
    }
}

fn cell_integer(row: &TableRow, idx: usize) -> Result<i64> {
    match row.f.get(idx).map(|cell| &cell.v) {
        Some(serde_json::Value::String(raw)) => raw
            .parse()
            .map_err(|_| AppError::data_source(format!("Invalid integer '{}'", raw))),
        Some(serde_json::Value::Null) | None => Ok(0),
        Some(other) => Err(AppError::data_source(format!("Invalid integer {}", other))),
    }
}
