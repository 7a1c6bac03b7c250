// Dashboard module: view assembly, formatting and HTTP endpoints

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{ChartSeries, DashboardView, KpiCard};
pub use services::{DashboardService, DateRangeQuery};
