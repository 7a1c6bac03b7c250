use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::PeriodKey;
use super::sales_record::SalesRecord;

/// KPIs derived for one period, recomputed on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Period the headline figures describe
    pub period: PeriodKey,
    /// Period the growth figures compare against
    pub prior_period: PeriodKey,
    /// Current totals; revenue and refunds rounded to the nearest ten
    pub current: SalesRecord,
    /// Prior totals, or the all-ones placeholder when no prior data exists
    pub prior: SalesRecord,
    /// False when `prior` is the placeholder, in which case growth
    /// percentages are measured against 1 and are not meaningful
    pub prior_period_present: bool,
    pub revenue_growth: Decimal,
    pub units_growth: Decimal,
    pub new_customer_growth: Decimal,
    /// Revenue per transaction
    pub average_ticket: Decimal,
    /// Refunds as a percentage of revenue
    pub refund_rate: Decimal,
}
