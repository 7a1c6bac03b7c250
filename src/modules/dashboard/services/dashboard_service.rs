use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::core::{Clock, Result};
use crate::modules::dashboard::models::{DashboardView, SalesSlice};
use crate::modules::sales::models::{KpiSnapshot, PeriodKey, SalesSeries};
use crate::modules::sales::repositories::SalesDataSource;
use crate::modules::sales::services::{filter_by_window, kpi_snapshot};

use super::date_range::{resolve_window, DateRangeQuery};
use super::view_builder::build_view;

/// Request-scoped dashboard computations.
///
/// Each call fetches the data once and recomputes everything from scratch;
/// nothing derived is kept between requests.
pub struct DashboardService {
    source: Arc<dyn SalesDataSource>,
    clock: Arc<dyn Clock>,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn SalesDataSource>,
        clock: Arc<dyn Clock>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Period key the headline KPIs describe: the bucket containing today
    pub fn current_period(&self) -> PeriodKey {
        self.config.granularity.period_of(self.clock.today())
    }

    /// Full dashboard, chart filtered to `range`
    pub async fn dashboard(&self, range: &DateRangeQuery) -> Result<DashboardView> {
        let series = self.load_series().await?;
        let period = self.current_period();

        let view = build_view(
            &self.config.title,
            &series,
            period,
            range,
            self.config.currency,
        );

        info!(
            period = %period,
            chart_points = view.chart.points.len(),
            prior_period_present = view.snapshot.prior_period_present,
            "Dashboard computed"
        );

        Ok(view)
    }

    /// KPI snapshot for `period`, or for the current period when `None`
    pub async fn snapshot(&self, period: Option<PeriodKey>) -> Result<KpiSnapshot> {
        let series = self.load_series().await?;
        let period = period.unwrap_or_else(|| self.current_period());

        Ok(kpi_snapshot(series.records(), period))
    }

    /// Records inside the clamped `range`
    pub async fn sales(&self, range: &DateRangeQuery) -> Result<SalesSlice> {
        let series = self.load_series().await?;
        let window = resolve_window(&series, range);

        let records = match window {
            Some(window) => filter_by_window(series.records(), window).to_vec(),
            None => Vec::new(),
        };

        Ok(SalesSlice { window, records })
    }

    /// Readiness of the underlying data source
    pub async fn ping(&self) -> Result<()> {
        self.source.ping().await
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    async fn load_series(&self) -> Result<SalesSeries> {
        let records = self.source.fetch().await?;
        let series = SalesSeries::new(records)?;

        if series.is_empty() {
            warn!(source = self.source.name(), "Data source returned no sales records");
        }

        Ok(series)
    }
}
