use std::sync::Arc;

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::debug;

use super::data_source::SalesDataSource;
use crate::core::{Clock, Result};
use crate::modules::sales::models::{Granularity, PeriodKey, SalesRecord};

/// Generates plausible sales history ending at today's period.
///
/// Output is fully determined by the seed, the period count and the clock,
/// so two fetches on the same day return the same records.
pub struct SyntheticSalesSource {
    clock: Arc<dyn Clock>,
    granularity: Granularity,
    periods: u32,
    seed: u64,
}

impl SyntheticSalesSource {
    pub fn new(clock: Arc<dyn Clock>, granularity: Granularity, periods: u32, seed: u64) -> Self {
        Self {
            clock,
            granularity,
            periods,
            seed,
        }
    }

    /// Build the records, oldest first
    pub fn generate(&self) -> Vec<SalesRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        // Revenue range in cents per bucket
        let (low, high) = match self.granularity {
            Granularity::Daily => (3_000_000_i64, 10_000_000_i64),
            Granularity::Monthly => (90_000_000_i64, 300_000_000_i64),
        };

        let mut keys: Vec<PeriodKey> = Vec::with_capacity(self.periods as usize);
        let mut key = self.granularity.period_of(self.clock.today());
        for _ in 0..self.periods {
            keys.push(key);
            key = key.pred();
        }
        keys.reverse();

        keys.into_iter()
            .map(|period| {
                let revenue_cents = rng.gen_range(low..high);
                let ticket_cents = rng.gen_range(15_000_i64..25_000);
                let transactions = (revenue_cents / ticket_cents).max(1);
                let units = transactions * rng.gen_range(1_i64..=3);
                let new_customers = transactions * rng.gen_range(10_i64..=30) / 100;
                let refund_bps = rng.gen_range(50_i64..=300);
                let refund_cents = revenue_cents * refund_bps / 10_000;

                SalesRecord::new(
                    period,
                    Decimal::new(revenue_cents, 2),
                    transactions,
                    units,
                    new_customers,
                    Decimal::new(refund_cents, 2),
                )
            })
            .collect()
    }
}

#[async_trait]
impl SalesDataSource for SyntheticSalesSource {
    async fn fetch(&self) -> Result<Vec<SalesRecord>> {
        let records = self.generate();
        debug!(
            periods = records.len(),
            granularity = %self.granularity,
            "Generated synthetic sales data"
        );
        Ok(records)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
