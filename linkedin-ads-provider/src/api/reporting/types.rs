use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{JsonObject, SortOrder};

/// Calendar day as LinkedIn encodes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
}

/// Date range of a reported row. Either bound may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedDateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
}

impl ReportedDateRange {
    /// `None` when neither bound is present.
    pub fn non_empty(self) -> Option<Self> {
        (self.start.is_some() || self.end.is_some()).then_some(self)
    }
}

/// Bucketing of analytics rows over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeGranularity {
    All,
    Daily,
    Monthly,
    Yearly,
}

impl TimeGranularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Daily => "DAILY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::str::FromStr for TimeGranularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "ALL" => Ok(Self::All),
            "DAILY" => Ok(Self::Daily),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(format!(
                "invalid time granularity: {other}. Must be one of ALL, DAILY, MONTHLY, YEARLY"
            )),
        }
    }
}

/// `sortBy` facet. Either part may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSort {
    pub field: Option<String>,
    pub order: Option<SortOrder>,
}

/// Parameters of the analytics finder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsQuery {
    /// Sponsored account always sent as the `accounts` facet.
    pub account_id: String,
    pub pivot: Option<String>,
    pub date_range: DateRange,
    pub time_granularity: Option<TimeGranularity>,
    pub campaign_type: Option<String>,
    pub shares: Vec<String>,
    pub campaigns: Vec<String>,
    pub campaign_groups: Vec<String>,
    /// Extra account URNs, merged into the `accounts` facet.
    pub accounts: Vec<String>,
    pub companies: Vec<String>,
    pub sort_by: AnalyticsSort,
    /// Metric projection; `pivotValues` is added when missing.
    pub fields: Vec<String>,
}

/// One analytics row.
///
/// `metrics` holds every key of the raw row except `dateRange` and
/// `pivotValues`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<ReportedDateRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pivot_values: Vec<String>,
    pub metrics: JsonObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPaging {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub elements: Vec<AnalyticsElement>,
    pub paging: AnalyticsPaging,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsEnvelope {
    #[serde(default)]
    pub elements: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub paging: Option<AnalyticsPaging>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
