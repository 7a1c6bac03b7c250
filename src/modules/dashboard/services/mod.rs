pub mod dashboard_service;
pub mod date_range;
pub mod formatting;
pub mod view_builder;

pub use dashboard_service::DashboardService;
pub use date_range::{resolve_window, DateRangeQuery};
pub use formatting::{
    format_compact, format_count, format_currency, format_percent, growth_indicator,
    GrowthIndicator, Trend,
};
pub use view_builder::{build_cards, build_view};
