use crate::core::Currency;
use crate::modules::dashboard::models::{CardSpec, ChartSeries, DashboardView, KpiCard};
use crate::modules::sales::models::{KpiSnapshot, PeriodKey, SalesRecord, SalesSeries};
use crate::modules::sales::services::{filter_by_window, kpi_snapshot};

use super::date_range::{resolve_window, DateRangeQuery};
use super::formatting::{
    format_count, format_currency, format_percent, growth_indicator, GrowthIndicator,
};

const GROWTH_LABEL: &str = "MoM Growth";
const GROWTH_LABEL_NO_PRIOR: &str = "MoM Growth (no prior data)";

/// The five summary cards for a snapshot
pub fn build_cards(snapshot: &KpiSnapshot, currency: Currency) -> Vec<KpiCard> {
    let current = &snapshot.current;
    let growth_label = if snapshot.prior_period_present {
        GROWTH_LABEL
    } else {
        GROWTH_LABEL_NO_PRIOR
    };

    let revenue_growth = growth_indicator(snapshot.revenue_growth);
    let units_growth = growth_indicator(snapshot.units_growth);
    let customer_growth = growth_indicator(snapshot.new_customer_growth);

    let growth_card = |title: &str, total: String, growth: &GrowthIndicator, icon: &str| {
        KpiCard::build(CardSpec {
            title,
            primary_value: &total,
            primary_label: "Total",
            secondary_value: &growth.text,
            secondary_label: growth_label,
            icon,
            trend: Some(growth.trend),
        })
    };

    vec![
        growth_card(
            "Revenue",
            format_currency(current.approved_amount, currency),
            &revenue_growth,
            "fa-dollar-sign",
        ),
        KpiCard::build(CardSpec {
            title: "Sales",
            primary_value: &format_count(current.transaction_count, currency),
            primary_label: "Total",
            secondary_value: &format_currency(snapshot.average_ticket, currency),
            secondary_label: "Average Ticket",
            icon: "fa-shopping-cart",
            trend: None,
        }),
        growth_card(
            "Units Sold",
            format_count(current.units_sold, currency),
            &units_growth,
            "fa-box",
        ),
        growth_card(
            "New Customers",
            format_count(current.new_customers, currency),
            &customer_growth,
            "fa-user-plus",
        ),
        KpiCard::build(CardSpec {
            title: "Refunds",
            primary_value: &format_currency(current.refund_amount, currency),
            primary_label: "Total",
            secondary_value: &format_percent(snapshot.refund_rate),
            secondary_label: "Of Revenue",
            icon: "fa-hand-holding-usd",
            trend: None,
        }),
    ]
}

/// Assemble the full dashboard for `period` from already-fetched data
pub fn build_view(
    title: &str,
    series: &SalesSeries,
    period: PeriodKey,
    range: &DateRangeQuery,
    currency: Currency,
) -> DashboardView {
    let snapshot = kpi_snapshot(series.records(), period);
    let cards = build_cards(&snapshot, currency);

    let window = resolve_window(series, range);
    let visible: &[SalesRecord] = match window {
        Some(window) => filter_by_window(series.records(), window),
        None => &[],
    };
    let chart = ChartSeries::revenue(format!("{} by Period", title), visible);

    DashboardView {
        title: title.to_string(),
        snapshot,
        cards,
        chart,
        window,
    }
}
