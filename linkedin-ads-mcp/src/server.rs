//! MCP Server implementation for LinkedIn Ads.
//!
//! Exposes 3 read-only tools: ad account search, campaign search and
//! analytics reporting.

use async_trait::async_trait;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tokio::time::{Duration, timeout};

use linkedin_ads_provider::{
    AdAccountSearch, AdAccountSearchResult, AdAccountsRepository, AnalyticsQuery,
    AnalyticsResult, ApiError, CampaignSearch, CampaignSearchResult, CampaignsRepository,
    HttpClient, ReportingRepository,
};

use crate::schemas::{GetAnalyticsParams, SearchAdAccountsParams, SearchCampaignsParams};

/// Upper bound for one tool call, retries included.
const TOOL_TIMEOUT_SECS: u64 = 120;

/// Read access to the LinkedIn Marketing API as seen by the tools.
#[async_trait]
pub trait AdsGateway: Send + Sync {
    async fn search_ad_accounts(
        &self,
        search: &AdAccountSearch,
    ) -> linkedin_ads_provider::Result<AdAccountSearchResult>;

    async fn search_campaigns(
        &self,
        search: &CampaignSearch,
    ) -> linkedin_ads_provider::Result<CampaignSearchResult>;

    async fn get_analytics(
        &self,
        query: &AnalyticsQuery,
    ) -> linkedin_ads_provider::Result<AnalyticsResult>;
}

/// Gateway backed by the provider repositories.
pub struct RepositoryGateway<C> {
    pub ad_accounts: AdAccountsRepository<C>,
    pub campaigns: CampaignsRepository<C>,
    pub reporting: ReportingRepository<C>,
}

#[async_trait]
impl<C: HttpClient + 'static> AdsGateway for RepositoryGateway<C> {
    async fn search_ad_accounts(
        &self,
        search: &AdAccountSearch,
    ) -> linkedin_ads_provider::Result<AdAccountSearchResult> {
        self.ad_accounts.search(search).await
    }

    async fn search_campaigns(
        &self,
        search: &CampaignSearch,
    ) -> linkedin_ads_provider::Result<CampaignSearchResult> {
        self.campaigns.search(search).await
    }

    async fn get_analytics(
        &self,
        query: &AnalyticsQuery,
    ) -> linkedin_ads_provider::Result<AnalyticsResult> {
        self.reporting.get_analytics(query).await
    }
}

fn invalid_params(tool_name: &str, message: String) -> McpError {
    tracing::debug!("{tool_name} rejected parameters: {message}");
    McpError::invalid_params(message, None)
}

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    tracing::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

fn map_api_error(tool_name: &str, error: &ApiError) -> McpError {
    tracing::warn!("{tool_name} error: {error}");
    McpError::internal_error(error.to_string(), None)
}

/// Execute a gateway call with timeout, error mapping, and JSON serialization.
async fn run_tool<T: serde::Serialize>(
    duration: Duration,
    future: impl std::future::Future<Output = linkedin_ads_provider::Result<T>>,
    tool_name: &str,
) -> Result<CallToolResult, McpError> {
    let result = timeout(duration, future)
        .await
        .map_err(|_| McpError::internal_error(format!("{tool_name} timeout"), None))?
        .map_err(|e| map_api_error(tool_name, &e))?;

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {tool_name} result")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP Server for LinkedIn Ads.
#[derive(Clone)]
pub struct LinkedInAdsMcp {
    gateway: Arc<dyn AdsGateway>,
    /// Account used by `search_campaigns` when the caller names none.
    default_account_id: Option<String>,
    tool_timeout: Duration,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl LinkedInAdsMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(gateway: Arc<dyn AdsGateway>, default_account_id: Option<String>) -> Self {
        Self::with_timeout(
            gateway,
            default_account_id,
            Duration::from_secs(TOOL_TIMEOUT_SECS),
        )
    }

    fn with_timeout(
        gateway: Arc<dyn AdsGateway>,
        default_account_id: Option<String>,
        tool_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            default_account_id,
            tool_timeout,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl LinkedInAdsMcp {
    /// Search ad accounts.
    #[tool(
        description = "Search LinkedIn ad accounts by ID, status, reference, name or test flag. Supports offset pagination with start/count."
    )]
    async fn search_ad_accounts(
        &self,
        Parameters(params): Parameters<SearchAdAccountsParams>,
    ) -> Result<CallToolResult, McpError> {
        let search = params
            .into_search()
            .map_err(|e| invalid_params("Search ad accounts", e))?;

        run_tool(
            self.tool_timeout,
            self.gateway.search_ad_accounts(&search),
            "Search ad accounts",
        )
        .await
    }

    /// Search campaigns of an ad account.
    #[tool(
        description = "Search campaigns in a LinkedIn ad account by campaign group, status, type, name or test flag. Returns next_page_token for cursor pagination."
    )]
    async fn search_campaigns(
        &self,
        Parameters(params): Parameters<SearchCampaignsParams>,
    ) -> Result<CallToolResult, McpError> {
        let search = params
            .into_search(self.default_account_id.as_deref())
            .map_err(|e| invalid_params("Search campaigns", e))?;

        run_tool(
            self.tool_timeout,
            self.gateway.search_campaigns(&search),
            "Search campaigns",
        )
        .await
    }

    /// Fetch an analytics report.
    #[tool(
        description = "Get LinkedIn ad analytics for an account over a date range, pivoted by campaign, creative, company or member demographics."
    )]
    async fn get_analytics(
        &self,
        Parameters(params): Parameters<GetAnalyticsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params
            .into_query()
            .map_err(|e| invalid_params("Get analytics", e))?;

        run_tool(
            self.tool_timeout,
            self.gateway.get_analytics(&query),
            "Get analytics",
        )
        .await
    }
}

#[tool_handler]
impl ServerHandler for LinkedInAdsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "LinkedIn Ads MCP Server (read-only). \
                 Provides access to ad accounts, campaigns and analytics reports \
                 of the LinkedIn Marketing API. \
                 Use search_ad_accounts to discover account IDs, search_campaigns to list \
                 campaigns of an account, and get_analytics for performance metrics."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
