use async_trait::async_trait;

use crate::core::Result;
use crate::modules::sales::models::SalesRecord;

/// Supplier of periodic sales records
///
/// Implementations own their I/O and failure handling; the KPI aggregator
/// only ever sees the returned records.
#[async_trait]
pub trait SalesDataSource: Send + Sync {
    /// Fetch every available sales record
    async fn fetch(&self) -> Result<Vec<SalesRecord>>;

    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Short identifier for logs
    fn name(&self) -> &str;
}
