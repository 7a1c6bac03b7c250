use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{error, info};

use super::data_source::SalesDataSource;
use crate::core::Result;
use crate::modules::sales::models::SalesRecord;

/// Keeps the last successful fetch of another source and refreshes it on a
/// fixed interval. A failed refresh keeps serving the previous records.
pub struct CachedSalesSource {
    inner: Arc<dyn SalesDataSource>,
    records: RwLock<Option<Arc<Vec<SalesRecord>>>>,
    refresh_every: Duration,
}

impl CachedSalesSource {
    pub fn new(inner: Arc<dyn SalesDataSource>, refresh_every: Duration) -> Self {
        Self {
            inner,
            records: RwLock::new(None),
            refresh_every,
        }
    }

    /// Fetch from the wrapped source and replace the cached records
    pub async fn refresh(&self) -> Result<usize> {
        let fresh = self.inner.fetch().await?;
        let count = fresh.len();
        *self.records.write().await = Some(Arc::new(fresh));
        Ok(count)
    }

    /// Refresh loop; spawn as a tokio task in main.rs
    pub async fn start(self: Arc<Self>) {
        info!(
            source = self.inner.name(),
            every_secs = self.refresh_every.as_secs(),
            "Starting sales data refresher"
        );

        let mut ticker = interval(self.refresh_every);

        loop {
            ticker.tick().await;

            match self.refresh().await {
                Ok(count) => info!(records = count, "Sales data refreshed"),
                Err(e) => error!(error = %e, "Sales data refresh failed, serving cached records"),
            }
        }
    }
}

#[async_trait]
impl SalesDataSource for CachedSalesSource {
    async fn fetch(&self) -> Result<Vec<SalesRecord>> {
        if let Some(records) = self.records.read().await.as_ref() {
            return Ok(records.as_ref().clone());
        }

        self.refresh().await?;
        let cached = self.records.read().await;
        Ok(cached.as_ref().map(|r| r.as_ref().clone()).unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
