//! Display strings for dashboard figures. Pure functions, no state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::currency::group_thousands;
use crate::core::Currency;

const ONE_MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const ONE_THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Direction of a growth figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Trend::Up
        } else if value < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Trend::Up => "📈",
            Trend::Down => "📉",
            Trend::Flat => "➖",
        }
    }
}

/// Growth percentage rendered with its trend glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthIndicator {
    pub trend: Trend,
    pub text: String,
}

/// `📈 +12.5%`, `📉 -3.0%` or `➖ 0.0%`
pub fn growth_indicator(percent: Decimal) -> GrowthIndicator {
    let trend = Trend::of(percent);
    let value = fixed(percent, 1);
    let text = match trend {
        Trend::Up => format!("{} +{}%", trend.glyph(), value),
        Trend::Down | Trend::Flat => format!("{} {}%", trend.glyph(), value),
    };

    GrowthIndicator { trend, text }
}

/// Currency symbol, thousands separators, currency display scale
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    currency.format_amount(amount)
}

/// Integer count with the currency locale's thousands separator
pub fn format_count(count: i64, currency: Currency) -> String {
    let digits = count.unsigned_abs().to_string();
    let grouped = group_thousands(&digits, currency.thousands_separator());
    if count < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Two decimal places and a percent sign
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", fixed(percent, 2))
}

/// Short bar label: `1.2MM` from one million up, `350K` below
pub fn format_compact(amount: Decimal) -> String {
    if amount >= ONE_MILLION {
        format!("{}MM", fixed(amount / ONE_MILLION, 1))
    } else {
        format!("{}K", fixed(amount / ONE_THOUSAND, 0))
    }
}

// Decimal's precision formatting truncates, so round first
fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}
