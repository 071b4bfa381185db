//! MCP tool parameter schemas
//!
//! Defines the input parameter structures for all MCP tools, plus their
//! validation and conversion into provider requests.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use linkedin_ads_provider::{
    AdAccountSearch, AnalyticsQuery, AnalyticsSort, CampaignSearch, Date, DateRange, SortOrder,
    TimeGranularity,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Largest page the search finders accept.
pub const MAX_PAGE_SIZE: i64 = 1000;

const AD_ACCOUNT_STATUSES: &[&str] = &["DRAFT", "ACTIVE", "PAUSED", "ARCHIVED"];
const AD_ACCOUNT_SORT_FIELDS: &[&str] = &["id", "name", "createdTime", "lastModifiedTime"];
const REFERENCE_PREFIXES: &[&str] = &["urn:li:organization:", "urn:li:person:"];

const ANALYTICS_PIVOTS: &[&str] = &[
    "COMPANY",
    "ACCOUNT",
    "SHARE",
    "CAMPAIGN",
    "CREATIVE",
    "CAMPAIGN_GROUP",
    "CONVERSION",
    "CONVERSATION_NODE",
    "CONVERSATION_NODE_OPTION_INDEX",
    "SERVING_LOCATION",
    "CARD_INDEX",
    "MEMBER_COMPANY_SIZE",
    "MEMBER_INDUSTRY",
    "MEMBER_SENIORITY",
    "MEMBER_JOB_TITLE",
    "MEMBER_JOB_FUNCTION",
    "MEMBER_COUNTRY_V2",
    "MEMBER_REGION_V2",
    "MEMBER_COMPANY",
    "PLACEMENT_NAME",
    "IMPRESSION_DEVICE_TYPE",
    "EVENT_STAGE",
];
const CAMPAIGN_TYPES: &[&str] = &["TEXT_AD", "SPONSORED_UPDATES", "SPONSORED_INMAILS", "DYNAMIC"];
const ANALYTICS_SORT_FIELDS: &[&str] = &[
    "COST_IN_LOCAL_CURRENCY",
    "IMPRESSIONS",
    "CLICKS",
    "ONE_CLICK_LEADS",
    "OPENS",
    "SENDS",
    "EXTERNAL_WEBSITE_CONVERSIONS",
];

/// Parameters for `search_ad_accounts` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SearchAdAccountsParams {
    #[schemars(description = "LinkedIn Ad Account IDs (numeric values, e.g., 512345678)")]
    pub account_ids: Option<Vec<String>>,

    #[schemars(description = "Filter by account status (DRAFT, ACTIVE, PAUSED, ARCHIVED)")]
    pub status: Option<Vec<String>>,

    #[schemars(description = "Filter by test accounts: true, false, or omit for both")]
    pub test: Option<bool>,

    #[schemars(
        description = "Filter by associated entity URNs (urn:li:organization:{id} or urn:li:person:{id})"
    )]
    pub references: Option<Vec<String>>,

    #[schemars(description = "Filter by ad account names (exact match)")]
    pub names: Option<Vec<String>>,

    #[schemars(description = "Sort field: id, name, createdTime, lastModifiedTime")]
    pub sort_field: Option<String>,

    #[schemars(description = "Sort order: ASCENDING or DESCENDING")]
    pub sort_order: Option<String>,

    #[schemars(description = "Pagination start offset (>= 0)")]
    pub start: Option<i64>,

    #[schemars(description = "Results per page (1-1000)")]
    pub count: Option<i64>,
}

impl SearchAdAccountsParams {
    /// Validate and convert into a provider search.
    pub fn into_search(self) -> Result<AdAccountSearch, String> {
        let account_ids = trimmed_list("account_ids", self.account_ids)?;
        for (i, id) in account_ids.iter().enumerate() {
            if !is_numeric_id(id) {
                return Err(format!("account_ids[{i}] must contain only digits"));
            }
        }

        let references = trimmed_list("references", self.references)?;
        for (i, reference) in references.iter().enumerate() {
            if !REFERENCE_PREFIXES.iter().any(|p| reference.starts_with(p)) {
                return Err(format!(
                    "references[{i}] must start with urn:li:organization: or urn:li:person:"
                ));
            }
        }

        let status = trimmed_list("status", self.status)?;
        for value in &status {
            one_of("status", value, AD_ACCOUNT_STATUSES)?;
        }

        let sort_field = non_blank(self.sort_field);
        if let Some(field) = &sort_field {
            one_of("sort_field", field, AD_ACCOUNT_SORT_FIELDS)?;
        }

        Ok(AdAccountSearch {
            status,
            test: self.test,
            account_ids,
            references,
            names: trimmed_list("names", self.names)?,
            sort_field,
            sort_order: sort_order("sort_order", self.sort_order)?,
            start: bounded("start", self.start, 0, i64::from(u32::MAX))?,
            count: bounded("count", self.count, 1, MAX_PAGE_SIZE)?,
        })
    }
}

/// Parameters for `search_campaigns` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SearchCampaignsParams {
    #[schemars(
        description = "LinkedIn Ad Account ID (numeric). Defaults to the configured LINKEDIN_ACCOUNT_ID"
    )]
    pub account_id: Option<String>,

    #[schemars(description = "Filter by Campaign Group URNs (urn:li:sponsoredCampaignGroup:{id})")]
    pub campaign_group_urns: Option<Vec<String>>,

    #[schemars(description = "Filter by associated entity")]
    pub associated_entity_values: Option<Vec<String>>,

    #[schemars(description = "Filter by Campaign URNs (urn:li:sponsoredCampaign:{id})")]
    pub campaign_urns: Option<Vec<String>>,

    #[schemars(
        description = "Filter by status: ACTIVE, PAUSED, ARCHIVED, COMPLETED, CANCELED, DRAFT, PENDING_DELETION, REMOVED"
    )]
    pub status: Option<Vec<String>>,

    #[schemars(description = "Filter by type: TEXT_AD, SPONSORED_UPDATES, SPONSORED_INMAILS, DYNAMIC")]
    pub campaign_types: Option<Vec<String>>,

    #[schemars(description = "Filter by name (exact match)")]
    pub names: Option<Vec<String>>,

    #[schemars(description = "Filter by test campaigns: true, false, or omit for both")]
    pub test: Option<bool>,

    #[schemars(description = "Sort by campaign ID: ASCENDING or DESCENDING")]
    pub sort_order: Option<String>,

    #[schemars(description = "Results per page (1-1000)")]
    pub page_size: Option<i64>,

    #[schemars(description = "Opaque cursor returned as next_page_token by a previous call")]
    pub page_token: Option<String>,
}

impl SearchCampaignsParams {
    /// Validate and convert into a provider search, falling back to
    /// `default_account_id` when no account is given.
    pub fn into_search(self, default_account_id: Option<&str>) -> Result<CampaignSearch, String> {
        let account_id = non_blank(self.account_id)
            .or_else(|| non_blank(default_account_id.map(str::to_string)))
            .ok_or_else(|| {
                "account_id is required (no LINKEDIN_ACCOUNT_ID configured)".to_string()
            })?;
        if !is_numeric_id(&account_id) {
            return Err("account_id must contain only digits".to_string());
        }

        Ok(CampaignSearch {
            account_id,
            campaign_group_urns: self.campaign_group_urns.unwrap_or_default(),
            associated_entity_values: self.associated_entity_values.unwrap_or_default(),
            campaign_urns: self.campaign_urns.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            campaign_types: self.campaign_types.unwrap_or_default(),
            names: self.names.unwrap_or_default(),
            test: self.test,
            sort_order: sort_order("sort_order", self.sort_order)?,
            page_size: bounded("page_size", self.page_size, 1, MAX_PAGE_SIZE)?,
            page_token: non_blank(self.page_token),
        })
    }
}

/// Calendar day.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct DateParam {
    #[schemars(description = "Year (e.g., 2024)")]
    pub year: i32,
    #[schemars(description = "Month (1-12)")]
    pub month: u32,
    #[schemars(description = "Day (1-31)")]
    pub day: u32,
}

impl From<DateParam> for Date {
    fn from(date: DateParam) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

/// Parameters for `get_analytics` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAnalyticsParams {
    #[schemars(description = "LinkedIn Ad Account ID (numeric), always sent as the accounts facet")]
    pub account_id: String,

    #[schemars(
        description = "Pivot of results, e.g. CAMPAIGN, CREATIVE, ACCOUNT, MEMBER_COMPANY, MEMBER_JOB_TITLE"
    )]
    pub pivot: Option<String>,

    #[schemars(description = "Start date of the report (required)")]
    pub date_range_start: DateParam,

    #[schemars(description = "End date of the report (optional)")]
    pub date_range_end: Option<DateParam>,

    #[schemars(description = "Time granularity: ALL, DAILY, MONTHLY, YEARLY")]
    pub time_granularity: String,

    #[schemars(description = "Campaign type: TEXT_AD, SPONSORED_UPDATES, SPONSORED_INMAILS, DYNAMIC")]
    pub campaign_type: Option<String>,

    #[schemars(description = "Share URNs")]
    pub shares: Option<Vec<String>>,

    #[schemars(description = "Campaign URNs (urn:li:sponsoredCampaign:{id})")]
    pub campaigns: Option<Vec<String>>,

    #[schemars(description = "Campaign Group URNs (urn:li:sponsoredCampaignGroup:{id})")]
    pub campaign_groups: Option<Vec<String>>,

    #[schemars(description = "Additional Account URNs (urn:li:sponsoredAccount:{id})")]
    pub accounts: Option<Vec<String>>,

    #[schemars(description = "Organization URNs (urn:li:organization:{id})")]
    pub companies: Option<Vec<String>>,

    #[schemars(
        description = "Field to sort by: COST_IN_LOCAL_CURRENCY, IMPRESSIONS, CLICKS, ONE_CLICK_LEADS, OPENS, SENDS, EXTERNAL_WEBSITE_CONVERSIONS"
    )]
    pub sort_by_field: Option<String>,

    #[schemars(description = "Sort order: ASCENDING or DESCENDING")]
    pub sort_by_order: Option<String>,

    #[schemars(description = "Metric fields to fetch (required), e.g. impressions, clicks")]
    pub fields: Vec<String>,
}

impl GetAnalyticsParams {
    /// Validate and convert into a provider analytics query.
    pub fn into_query(self) -> Result<AnalyticsQuery, String> {
        let account_id = self.account_id.trim().to_string();
        if account_id.is_empty() {
            return Err("account_id is required".to_string());
        }

        let start = self.date_range_start;
        if start.year == 0 {
            return Err("date_range_start is required".to_string());
        }
        if let Some(end) = self.date_range_end {
            if (end.year, end.month, end.day) < (start.year, start.month, start.day) {
                return Err("date_range_end must not be before date_range_start".to_string());
            }
        }

        let time_granularity: TimeGranularity = self.time_granularity.parse()?;

        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            return Err("fields is required and cannot be empty".to_string());
        }

        let pivot = non_blank(self.pivot);
        if let Some(pivot) = &pivot {
            one_of("pivot", pivot, ANALYTICS_PIVOTS)?;
        }
        let campaign_type = non_blank(self.campaign_type);
        if let Some(campaign_type) = &campaign_type {
            one_of("campaign_type", campaign_type, CAMPAIGN_TYPES)?;
        }
        let sort_field = non_blank(self.sort_by_field);
        if let Some(field) = &sort_field {
            one_of("sort_by_field", field, ANALYTICS_SORT_FIELDS)?;
        }

        Ok(AnalyticsQuery {
            account_id,
            pivot,
            date_range: DateRange {
                start: start.into(),
                end: self.date_range_end.map(Date::from),
            },
            time_granularity: Some(time_granularity),
            campaign_type,
            shares: trimmed(self.shares),
            campaigns: trimmed(self.campaigns),
            campaign_groups: trimmed(self.campaign_groups),
            accounts: trimmed(self.accounts),
            companies: trimmed(self.companies),
            sort_by: AnalyticsSort {
                field: sort_field,
                order: sort_order("sort_by_order", self.sort_by_order)?,
            },
            fields,
        })
    }
}

// ============ Validation helpers ============

fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trimmed(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .collect()
}

/// Trim every item; a blank item is an error.
fn trimmed_list(name: &str, values: Option<Vec<String>>) -> Result<Vec<String>, String> {
    trimmed(values)
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            if v.is_empty() {
                Err(format!("{name}[{i}] cannot be empty"))
            } else {
                Ok(v)
            }
        })
        .collect()
}

fn one_of(name: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!("invalid {name}: {value}"))
    }
}

fn sort_order(name: &str, value: Option<String>) -> Result<Option<SortOrder>, String> {
    non_blank(value)
        .map(|v| {
            v.parse::<SortOrder>()
                .map_err(|_| format!("{name} must be ASCENDING or DESCENDING"))
        })
        .transpose()
}

/// `None` maps to 0 (parameter omitted).
fn bounded(name: &str, value: Option<i64>, min: i64, max: i64) -> Result<u32, String> {
    match value {
        None => Ok(0),
        Some(v) if v < min => Err(format!("{name} must be at least {min}")),
        Some(v) if v > max => Err(format!("{name} cannot exceed {max}")),
        Some(v) => u32::try_from(v).map_err(|_| format!("{name} is out of range")),
    }
}
