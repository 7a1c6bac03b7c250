use serde::{Deserialize, Serialize};

use super::chart::ChartSeries;
use super::kpi_card::KpiCard;
use crate::modules::sales::models::{KpiSnapshot, PeriodWindow, SalesRecord};

/// Everything the presentation layer needs to draw the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub snapshot: KpiSnapshot,
    pub cards: Vec<KpiCard>,
    pub chart: ChartSeries,
    /// Window the chart was filtered to; `None` when there is no data
    pub window: Option<PeriodWindow>,
}

/// Records selected by a date-range request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSlice {
    pub window: Option<PeriodWindow>,
    pub records: Vec<SalesRecord>,
}
