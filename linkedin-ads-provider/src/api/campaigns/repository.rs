use std::sync::Arc;

use reqwest::Url;

use crate::api::common::{fetch_envelope, present_elements};
use crate::error::Result;
use crate::traits::{ErrorLogger, HttpClient};
use crate::types::JsonObject;

use super::types::CampaignsEnvelope;
use super::{CampaignSearch, CampaignSearchMetadata, CampaignSearchResult, CampaignsQueryBuilder};

const PAGING_NEXT_KEY: &str = "next";
const QUERY_PARAM_PAGE_TOKEN: &str = "pageToken";

/// Campaign search over an [`HttpClient`].
pub struct CampaignsRepository<C> {
    client: C,
    query_builder: CampaignsQueryBuilder,
    logger: Option<Arc<dyn ErrorLogger>>,
}

impl<C: HttpClient> CampaignsRepository<C> {
    pub fn new(client: C, query_builder: CampaignsQueryBuilder) -> Self {
        Self {
            client,
            query_builder,
            logger: None,
        }
    }

    /// Report failures to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run the search finder. The next page cursor is lifted out of
    /// `paging.next`.
    pub async fn search(&self, input: &CampaignSearch) -> Result<CampaignSearchResult> {
        let (url, headers) = self.query_builder.build_search_query(input);

        let envelope: CampaignsEnvelope =
            fetch_envelope(&self.client, self.logger.as_ref(), &url, &headers).await?;

        let next_page_token = envelope
            .paging
            .as_ref()
            .and_then(|paging| next_page_token(&url, paging));

        Ok(CampaignSearchResult {
            elements: present_elements(envelope.elements),
            metadata: CampaignSearchMetadata { next_page_token },
        })
    }
}

/// `pageToken` of `paging.next`, resolving relative links against the
/// request URL. Anything missing or unparsable yields `None`.
fn next_page_token(request_url: &str, paging: &JsonObject) -> Option<String> {
    let next = paging
        .get(PAGING_NEXT_KEY)?
        .as_str()
        .filter(|next| !next.is_empty())?;

    let base = Url::parse(request_url).ok()?;
    let next = base.join(next).ok()?;

    next.query_pairs()
        .find(|(key, _)| key == QUERY_PARAM_PAGE_TOKEN)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}
