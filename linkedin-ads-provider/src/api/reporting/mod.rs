//! Ad analytics reporting (`GET /adAnalytics?q=analytics`).

mod query;
mod repository;
mod types;

pub use query::ReportingQueryBuilder;
pub use repository::ReportingRepository;
pub use types::{
    AnalyticsElement, AnalyticsPaging, AnalyticsQuery, AnalyticsResult, AnalyticsSort, Date,
    DateRange, ReportedDateRange, TimeGranularity,
};

pub(crate) const AD_ANALYTICS_PATH: &str = "/adAnalytics";

/// Pivots sent bare (`pivot=P`); every other pivot is wrapped as
/// `pivot=(value:P)`.
pub(crate) const SIMPLE_PIVOTS: &[&str] = &[
    "MEMBER_COMPANY",
    "MEMBER_INDUSTRY",
    "MEMBER_SENIORITY",
    "MEMBER_JOB_TITLE",
    "MEMBER_JOB_FUNCTION",
    "MEMBER_COUNTRY_V2",
    "MEMBER_REGION_V2",
];

/// Element key holding the reported date range.
pub(crate) const FIELD_DATE_RANGE: &str = "dateRange";
/// Element key holding the pivot identifiers; always requested.
pub(crate) const FIELD_PIVOT_VALUES: &str = "pivotValues";
