use async_trait::async_trait;

use super::data_source::SalesDataSource;
use crate::core::Result;
use crate::modules::sales::models::SalesRecord;

/// Serves a fixed set of records
#[derive(Debug, Clone, Default)]
pub struct InMemorySalesSource {
    records: Vec<SalesRecord>,
}

impl InMemorySalesSource {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SalesDataSource for InMemorySalesSource {
    async fn fetch(&self) -> Result<Vec<SalesRecord>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}
