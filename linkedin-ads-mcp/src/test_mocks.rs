use super::*;

use linkedin_ads_provider::{
    AdAccountsQueryBuilder, ApiConfig, CampaignSearchMetadata, CampaignsQueryBuilder, Method,
    ReportingQueryBuilder, RequestHeaders, Response,
};
use serde::Serialize;
use tokio::sync::Mutex;

/// Test-only gateway recording the requests it receives.
#[derive(Default)]
pub struct MockAdsGateway {
    ad_account_calls: Mutex<Vec<AdAccountSearch>>,
    campaign_calls: Mutex<Vec<CampaignSearch>>,
    analytics_calls: Mutex<Vec<AnalyticsQuery>>,
    delay: Mutex<Option<Duration>>,
    error: Mutex<Option<ApiError>>,
}

impl MockAdsGateway {
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().await = delay;
    }

    pub async fn set_error(&self, error: Option<ApiError>) {
        *self.error.lock().await = error;
    }

    pub async fn ad_account_calls(&self) -> Vec<AdAccountSearch> {
        self.ad_account_calls.lock().await.clone()
    }

    pub async fn campaign_calls(&self) -> Vec<CampaignSearch> {
        self.campaign_calls.lock().await.clone()
    }

    pub async fn analytics_calls(&self) -> Vec<AnalyticsQuery> {
        self.analytics_calls.lock().await.clone()
    }

    async fn outcome(&self) -> linkedin_ads_provider::Result<()> {
        if let Some(delay) = *self.delay.lock().await {
            tokio::time::sleep(delay).await;
        }
        match self.error.lock().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdsGateway for MockAdsGateway {
    async fn search_ad_accounts(
        &self,
        search: &AdAccountSearch,
    ) -> linkedin_ads_provider::Result<AdAccountSearchResult> {
        self.ad_account_calls.lock().await.push(search.clone());
        self.outcome().await?;
        Ok(AdAccountSearchResult::default())
    }

    async fn search_campaigns(
        &self,
        search: &CampaignSearch,
    ) -> linkedin_ads_provider::Result<CampaignSearchResult> {
        self.campaign_calls.lock().await.push(search.clone());
        self.outcome().await?;
        Ok(CampaignSearchResult {
            elements: Vec::new(),
            metadata: CampaignSearchMetadata {
                next_page_token: Some("next-token".to_string()),
            },
        })
    }

    async fn get_analytics(
        &self,
        query: &AnalyticsQuery,
    ) -> linkedin_ads_provider::Result<AnalyticsResult> {
        self.analytics_calls.lock().await.push(query.clone());
        self.outcome().await?;
        Ok(AnalyticsResult::default())
    }
}

/// Test-only HTTP client answering every request with one canned body.
pub struct CannedHttpClient {
    status: u16,
    body: String,
    urls: Mutex<Vec<String>>,
}

impl CannedHttpClient {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub async fn urls(&self) -> Vec<String> {
        self.urls.lock().await.clone()
    }
}

#[async_trait]
impl HttpClient for CannedHttpClient {
    async fn request<B>(
        &self,
        _method: Method,
        url: &str,
        _body: Option<&B>,
        _headers: &RequestHeaders,
    ) -> linkedin_ads_provider::Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.urls.lock().await.push(url.to_string());
        Ok(Response {
            status: self.status,
            headers: std::collections::HashMap::new(),
            body: self.body.clone().into_bytes(),
        })
    }
}

pub fn repository_gateway(client: Arc<CannedHttpClient>) -> RepositoryGateway<Arc<CannedHttpClient>> {
    let config = ApiConfig::new("Bearer test-token").with_base_url("https://api.test/rest");
    RepositoryGateway {
        ad_accounts: AdAccountsRepository::new(
            Arc::clone(&client),
            AdAccountsQueryBuilder::new(config.clone()),
        ),
        campaigns: CampaignsRepository::new(
            Arc::clone(&client),
            CampaignsQueryBuilder::new(config.clone()),
        ),
        reporting: ReportingRepository::new(client, ReportingQueryBuilder::new(config)),
    }
}

pub fn build_server(
    gateway: Arc<dyn AdsGateway>,
    default_account_id: Option<&str>,
    tool_timeout: Duration,
) -> LinkedInAdsMcp {
    LinkedInAdsMcp::with_timeout(gateway, default_account_id.map(str::to_string), tool_timeout)
}

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn analytics_params() -> GetAnalyticsParams {
    serde_json::from_value(serde_json::json!({
        "account_id": "507",
        "pivot": "CAMPAIGN",
        "date_range_start": {"year": 2024, "month": 1, "day": 1},
        "time_granularity": "DAILY",
        "fields": ["impressions", "clicks"]
    }))
    .unwrap()
}
