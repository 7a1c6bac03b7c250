//! SalesPulse Sales KPI Dashboard Library
//!
//! Sales records, KPI aggregation, dashboard view assembly and the HTTP
//! endpoints serving them.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::dashboard;
pub use modules::sales;
