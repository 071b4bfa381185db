use crate::api::common::{QueryString, build_headers, cleaned, encode, endpoint};
use crate::types::{ApiConfig, RequestHeaders};

use super::{AD_ANALYTICS_PATH, AnalyticsQuery, Date, FIELD_PIVOT_VALUES, SIMPLE_PIVOTS};

const SPONSORED_ACCOUNT_URN_PREFIX: &str = "urn:li:sponsoredAccount:";

/// Builds analytics finder requests.
#[derive(Debug, Clone)]
pub struct ReportingQueryBuilder {
    config: ApiConfig,
}

impl ReportingQueryBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL and headers of `GET /adAnalytics?q=analytics`.
    pub fn build_analytics_query(&self, input: &AnalyticsQuery) -> (String, RequestHeaders) {
        let mut query = QueryString::new("analytics");

        if let Some(pivot) = non_blank(input.pivot.as_deref()) {
            if SIMPLE_PIVOTS.contains(&pivot) {
                query.raw("pivot", encode(pivot));
            } else {
                query.raw("pivot", format!("(value:{})", encode(pivot)));
            }
        }

        let range = &input.date_range;
        match range.end {
            Some(end) => query.raw(
                "dateRange",
                format!("(start:{},end:{})", format_date(range.start), format_date(end)),
            ),
            None => query.raw("dateRange", format!("(start:{})", format_date(range.start))),
        };

        if let Some(granularity) = input.time_granularity {
            query.raw("timeGranularity", format!("(value:{})", granularity.as_str()));
        }

        query.raw("accounts", list(&account_facet(input)));
        for (facet, values) in [
            ("shares", &input.shares),
            ("campaigns", &input.campaigns),
            ("campaignGroups", &input.campaign_groups),
            ("companies", &input.companies),
        ] {
            let values = cleaned(values);
            if !values.is_empty() {
                query.raw(facet, list(&values));
            }
        }

        if let Some(campaign_type) = non_blank(input.campaign_type.as_deref()) {
            query.raw("campaignType", format!("(value:{})", encode(campaign_type)));
        }

        if let Some(sort_by) = sort_by(input) {
            query.raw("sortBy", sort_by);
        }

        query.raw("fields", fields(&input.fields).join(","));

        let url = format!(
            "{}?{}",
            endpoint(&self.config, AD_ANALYTICS_PATH),
            query.finish()
        );
        (url, build_headers(&self.config))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn format_date(date: Date) -> String {
    format!("(day:{},month:{},year:{})", date.day, date.month, date.year)
}

/// `List(a,b)` with every item percent-encoded.
fn list(items: &[impl AsRef<str>]) -> String {
    let items: Vec<String> = items.iter().map(|item| encode(item.as_ref())).collect();
    format!("List({})", items.join(","))
}

/// The account under report first, then caller supplied accounts not yet
/// listed.
fn account_facet(input: &AnalyticsQuery) -> Vec<String> {
    let mut accounts = vec![format!(
        "{SPONSORED_ACCOUNT_URN_PREFIX}{}",
        input.account_id.trim()
    )];
    for account in cleaned(&input.accounts) {
        if !accounts.iter().any(|a| a == account) {
            accounts.push(account.to_string());
        }
    }
    accounts
}

fn sort_by(input: &AnalyticsQuery) -> Option<String> {
    let field = non_blank(input.sort_by.field.as_deref()).map(|f| format!("field:{}", encode(f)));
    let order = input.sort_by.order.map(|o| format!("order:{}", o.as_str()));

    let parts: Vec<String> = field.into_iter().chain(order).collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join(",")))
    }
}

fn fields(requested: &[String]) -> Vec<&str> {
    let mut fields = cleaned(requested);
    if !fields.contains(&FIELD_PIVOT_VALUES) {
        fields.push(FIELD_PIVOT_VALUES);
    }
    fields
}
