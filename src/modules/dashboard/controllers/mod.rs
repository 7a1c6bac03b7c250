mod dashboard_controller;

pub use dashboard_controller::{configure, get_dashboard, get_kpis, get_sales, KpiQuery};
