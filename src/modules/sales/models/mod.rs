mod kpi_snapshot;
mod period;
mod sales_record;

pub use kpi_snapshot::KpiSnapshot;
pub use period::{Granularity, PeriodKey, PeriodWindow, DAILY_PRIOR_OFFSET_DAYS};
pub use sales_record::{SalesRecord, SalesSeries};
