// Sales module: records, KPI aggregation and data sources

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Granularity, KpiSnapshot, PeriodKey, PeriodWindow, SalesRecord, SalesSeries};
pub use repositories::SalesDataSource;
