use crate::api::common::{QueryString, SearchCriteria, build_headers, encode, endpoint};
use crate::types::{ApiConfig, RequestHeaders};

use super::CampaignSearch;

/// Builds campaign search requests.
#[derive(Debug, Clone)]
pub struct CampaignsQueryBuilder {
    config: ApiConfig,
}

impl CampaignsQueryBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL and headers of `GET /adAccounts/{id}/adCampaigns?q=search`.
    pub fn build_search_query(&self, input: &CampaignSearch) -> (String, RequestHeaders) {
        let path = format!("/adAccounts/{}/adCampaigns", encode(input.account_id.trim()));

        let mut search = SearchCriteria::default();
        search
            .list("campaignGroup", &input.campaign_group_urns)
            .list("associatedEntity", &input.associated_entity_values)
            .list("id", &input.campaign_urns)
            .list("status", &input.status)
            .list("type", &input.campaign_types)
            .list("name", &input.names)
            .flag("test", input.test);

        let mut query = QueryString::new("search");
        if let Some(search) = search.build() {
            query.raw("search", search);
        }
        query
            .encoded("sortOrder", input.sort_order.map(|o| o.as_str()))
            .positive("pageSize", input.page_size)
            .encoded("pageToken", input.page_token.as_deref());

        let url = format!("{}?{}", endpoint(&self.config, &path), query.finish());
        (url, build_headers(&self.config))
    }
}
