use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::modules::sales::models::{PeriodKey, PeriodWindow, SalesSeries};

/// Date-range selection as it arrives from the client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    /// `YYYY-MM-DD` or `YYYY-MM`; defaults to the first period with data
    #[serde(default)]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD` or `YYYY-MM`; defaults to the last period with data
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    pub fn new(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Start,
    End,
}

/// Turns client bounds into a window over `series`.
///
/// Missing or unparseable bounds fall back to the data's first/last period
/// and every bound is clamped into the data's range. Reversed bounds are
/// kept as they are and select nothing. Returns `None` for an empty series.
pub fn resolve_window(series: &SalesSeries, query: &DateRangeQuery) -> Option<PeriodWindow> {
    let granularity = series.granularity()?;
    let min = series.first_period()?.start();
    let max = series.last_period()?.end();

    let start = parse_bound(query.start_date.as_deref(), Edge::Start)
        .unwrap_or(min)
        .clamp(min, max);
    let end = parse_bound(query.end_date.as_deref(), Edge::End)
        .unwrap_or(max)
        .clamp(min, max);

    Some(PeriodWindow::from_dates(start, end, granularity))
}

fn parse_bound(raw: Option<&str>, edge: Edge) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<PeriodKey>() {
        Ok(key) => Some(match edge {
            Edge::Start => key.start(),
            Edge::End => key.end(),
        }),
        Err(e) => {
            warn!(bound = ?edge, input = raw, error = %e, "Ignoring unparseable date bound");
            None
        }
    }
}
