use serde::{Deserialize, Serialize};

use crate::modules::dashboard::services::formatting::Trend;

/// A value with its caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardValue {
    pub value: String,
    pub label: String,
}

/// Summary card descriptor handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCard {
    pub title: String,
    /// Icon identifier, e.g. `fa-dollar-sign`
    pub icon: String,
    pub primary: CardValue,
    pub secondary: CardValue,
    /// Set when the secondary value is a growth figure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Everything needed to build one card
#[derive(Debug, Clone, Copy)]
pub struct CardSpec<'a> {
    pub title: &'a str,
    pub primary_value: &'a str,
    pub primary_label: &'a str,
    pub secondary_value: &'a str,
    pub secondary_label: &'a str,
    pub icon: &'a str,
    pub trend: Option<Trend>,
}

impl KpiCard {
    pub fn build(spec: CardSpec<'_>) -> Self {
        Self {
            title: spec.title.to_string(),
            icon: spec.icon.to_string(),
            primary: CardValue {
                value: spec.primary_value.to_string(),
                label: spec.primary_label.to_string(),
            },
            secondary: CardValue {
                value: spec.secondary_value.to_string(),
                label: spec.secondary_label.to_string(),
            },
            trend: spec.trend,
        }
    }
}
