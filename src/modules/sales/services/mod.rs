pub mod kpi_aggregator;

pub use kpi_aggregator::{
    average_ticket, current_period_totals, filter_by_window, growth_percent, kpi_snapshot,
    period_totals, prior_period_totals, refund_rate, round_to_tens,
};
