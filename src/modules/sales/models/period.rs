use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Days between a daily period and the one it is compared against
pub const DAILY_PRIOR_OFFSET_DAYS: u64 = 30;

/// Bucket size of a sales dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    /// Period key of this granularity containing `date`
    pub fn period_of(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Granularity::Daily => PeriodKey::day(date),
            Granularity::Monthly => PeriodKey::month_of(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "monthly" | "month" => Ok(Granularity::Monthly),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

/// Calendar bucket identifying a sales period.
///
/// Keys order by their first calendar day. Monthly keys render as `YYYY-MM`,
/// daily keys as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    start: NaiveDate,
    granularity: Granularity,
}

impl PeriodKey {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            granularity: Granularity::Daily,
        }
    }

    /// Month bucket for `year`/`month`, `None` if the month is out of range
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|start| Self {
            start,
            granularity: Granularity::Monthly,
        })
    }

    /// Month bucket containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: date.with_day(1).unwrap_or(date),
            granularity: Granularity::Monthly,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// First calendar day of the bucket
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day of the bucket
    pub fn end(&self) -> NaiveDate {
        match self.granularity {
            Granularity::Daily => self.start,
            Granularity::Monthly => self
                .start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// The period this one is compared against for growth figures:
    /// the previous calendar month for monthly keys, 30 days earlier for daily keys.
    pub fn prior(&self) -> Self {
        let start = match self.granularity {
            Granularity::Daily => self.start.checked_sub_days(Days::new(DAILY_PRIOR_OFFSET_DAYS)),
            Granularity::Monthly => self.start.checked_sub_months(Months::new(1)),
        };
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            granularity: self.granularity,
        }
    }

    /// The adjacent preceding bucket (one day or one month back)
    pub fn pred(&self) -> Self {
        let start = match self.granularity {
            Granularity::Daily => self.start.pred_opt(),
            Granularity::Monthly => self.start.checked_sub_months(Months::new(1)),
        };
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            granularity: self.granularity,
        }
    }

    /// True when `other` falls entirely inside this bucket
    pub fn contains(&self, other: &PeriodKey) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Daily => write!(f, "{}", self.start.format("%Y-%m-%d")),
            Granularity::Monthly => write!(f, "{}", self.start.format("%Y-%m")),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(PeriodKey::day(date));
        }
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(PeriodKey::month_of)
            .map_err(|_| format!("Invalid period key: '{}'. Expected YYYY-MM or YYYY-MM-DD", s))
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of period keys selecting a contiguous run of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: PeriodKey,
    pub end: PeriodKey,
}

impl PeriodWindow {
    pub fn new(start: PeriodKey, end: PeriodKey) -> Self {
        Self { start, end }
    }

    /// Window over two calendar dates, bucketed at `granularity`
    pub fn from_dates(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start: granularity.period_of(start),
            end: granularity.period_of(end),
        }
    }

    /// An end before the start selects nothing
    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, key: &PeriodKey) -> bool {
        *key >= self.start && *key <= self.end
    }
}
