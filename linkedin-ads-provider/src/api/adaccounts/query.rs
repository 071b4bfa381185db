use crate::api::common::{QueryString, SearchCriteria, build_headers, encode, endpoint};
use crate::types::{ApiConfig, RequestHeaders};

use super::{AD_ACCOUNTS_PATH, AdAccountSearch};

/// Builds ad account search requests.
#[derive(Debug, Clone)]
pub struct AdAccountsQueryBuilder {
    config: ApiConfig,
}

impl AdAccountsQueryBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL and headers of `GET /adAccounts?q=search`.
    pub fn build_search_query(&self, input: &AdAccountSearch) -> (String, RequestHeaders) {
        let mut search = SearchCriteria::default();
        search
            .list("status", &input.status)
            .list("id", &input.account_ids)
            .list("reference", &input.references)
            .list("name", &input.names)
            .flag("test", input.test);

        let mut query = QueryString::new("search");
        if let Some(search) = search.build() {
            query.raw("search", search);
        }
        // Not part of the historical wire contract, which never sent a sort.
        if let Some(sort) = sort_param(input) {
            query.raw("sort", sort);
        }
        query.positive("start", input.start).positive("count", input.count);

        let url = format!(
            "{}?{}",
            endpoint(&self.config, AD_ACCOUNTS_PATH),
            query.finish()
        );
        (url, build_headers(&self.config))
    }
}

/// `(field:F,order:O)`; the order alone is meaningless to the finder.
fn sort_param(input: &AdAccountSearch) -> Option<String> {
    let field = input
        .sort_field
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())?;

    Some(match input.sort_order {
        Some(order) => format!("(field:{},order:{})", encode(field), order.as_str()),
        None => format!("(field:{})", encode(field)),
    })
}
