use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::dashboard::services::formatting::format_compact;
use crate::modules::sales::models::{PeriodKey, SalesRecord};

/// Headroom above the tallest bar so outside labels fit
const Y_AXIS_HEADROOM: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// One bar of the revenue chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub period: PeriodKey,
    pub value: Decimal,
    /// Compact text shown above the bar
    pub label: String,
}

/// Bar chart series of approved revenue per period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
    /// Upper bound for the value axis; 0 for an empty series. Without room
    /// for headroom it is the tallest bar.
    pub y_axis_max: Decimal,
}

impl ChartSeries {
    pub fn revenue(title: impl Into<String>, records: &[SalesRecord]) -> Self {
        let points: Vec<ChartPoint> = records
            .iter()
            .map(|r| ChartPoint {
                period: r.period,
                value: r.approved_amount,
                label: format_compact(r.approved_amount),
            })
            .collect();

        let y_axis_max = points
            .iter()
            .map(|p| p.value)
            .max()
            .map(|max| max.checked_mul(Y_AXIS_HEADROOM).unwrap_or(max))
            .unwrap_or(Decimal::ZERO);

        Self {
            title: title.into(),
            points,
            y_axis_max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
