mod chart;
mod dashboard_view;
mod kpi_card;

pub use chart::{ChartPoint, ChartSeries};
pub use dashboard_view::{DashboardView, SalesSlice};
pub use kpi_card::{CardSpec, CardValue, KpiCard};
