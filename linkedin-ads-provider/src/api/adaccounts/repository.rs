use std::sync::Arc;

use crate::api::common::fetch_envelope;
use crate::error::Result;
use crate::traits::{ErrorLogger, HttpClient};

use super::types::AdAccountsEnvelope;
use super::{AdAccountSearch, AdAccountSearchResult, AdAccountsQueryBuilder};

/// Ad account search over an [`HttpClient`].
pub struct AdAccountsRepository<C> {
    client: C,
    query_builder: AdAccountsQueryBuilder,
    logger: Option<Arc<dyn ErrorLogger>>,
}

impl<C: HttpClient> AdAccountsRepository<C> {
    pub fn new(client: C, query_builder: AdAccountsQueryBuilder) -> Self {
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

    /// Run the search finder and return the page as-is.
    pub async fn search(&self, input: &AdAccountSearch) -> Result<AdAccountSearchResult> {
        let (url, headers) = self.query_builder.build_search_query(input);

        let envelope: AdAccountsEnvelope =
            fetch_envelope(&self.client, self.logger.as_ref(), &url, &headers).await?;

        Ok(envelope.into())
    }
}
