use super::test_mocks::*;
use super::*;

use linkedin_ads_provider::{ErrorBody, SortOrder, TimeGranularity};

#[test]
fn sanitize_internal_error_hides_error_details() {
    let error = sanitize_internal_error("sensitive: token=123", "Serialize test result");
    let message = error.to_string();
    assert!(message.contains("Serialize test result failed"));
    assert!(!message.contains("token=123"));
}

#[tokio::test]
async fn search_ad_accounts_passes_validated_search() {
    let gateway = Arc::new(MockAdsGateway::default());
    let server = build_server(Arc::clone(&gateway) as Arc<dyn AdsGateway>, None, TEST_TIMEOUT);

    let result = server
        .search_ad_accounts(Parameters(SearchAdAccountsParams {
            account_ids: Some(vec![" 512345678 ".to_string()]),
            status: Some(vec!["ACTIVE".to_string()]),
            sort_field: Some("name".to_string()),
            sort_order: Some("ASCENDING".to_string()),
            count: Some(10),
            ..SearchAdAccountsParams::default()
        }))
        .await;

    assert!(result.is_ok());

    let calls = gateway.ad_account_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].account_ids, vec!["512345678".to_string()]);
    assert_eq!(calls[0].status, vec!["ACTIVE".to_string()]);
    assert_eq!(calls[0].sort_field.as_deref(), Some("name"));
    assert_eq!(calls[0].sort_order, Some(SortOrder::Ascending));
    assert_eq!(calls[0].count, 10);
}

#[tokio::test]
async fn search_ad_accounts_rejects_invalid_params_without_calling_api() {
    let gateway = Arc::new(MockAdsGateway::default());
    let server = build_server(Arc::clone(&gateway) as Arc<dyn AdsGateway>, None, TEST_TIMEOUT);

    let error = server
        .search_ad_accounts(Parameters(SearchAdAccountsParams {
            count: Some(5000),
            ..SearchAdAccountsParams::default()
        }))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("count cannot exceed 1000"));
    assert!(gateway.ad_account_calls().await.is_empty());
}

#[tokio::test]
async fn search_campaigns_uses_default_account() {
    let gateway = Arc::new(MockAdsGateway::default());
    let server = build_server(
        Arc::clone(&gateway) as Arc<dyn AdsGateway>,
        Some("507"),
        TEST_TIMEOUT,
    );

    let result = server
        .search_campaigns(Parameters(SearchCampaignsParams {
            status: Some(vec!["ACTIVE".to_string()]),
            page_size: Some(25),
            ..SearchCampaignsParams::default()
        }))
        .await
        .unwrap();

    let calls = gateway.campaign_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].account_id, "507");
    assert_eq!(calls[0].page_size, 25);

    let text = format!("{:?}", result.content[0]);
    assert!(text.contains("next-token"));
}

#[tokio::test]
async fn search_campaigns_without_account_is_invalid() {
    let gateway = Arc::new(MockAdsGateway::default());
    let server = build_server(Arc::clone(&gateway) as Arc<dyn AdsGateway>, None, TEST_TIMEOUT);

    let error = server
        .search_campaigns(Parameters(SearchCampaignsParams::default()))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("account_id is required"));
    assert!(gateway.campaign_calls().await.is_empty());
}

#[tokio::test]
async fn get_analytics_converts_params() {
    let gateway = Arc::new(MockAdsGateway::default());
    let server = build_server(Arc::clone(&gateway) as Arc<dyn AdsGateway>, None, TEST_TIMEOUT);

    let result = server.get_analytics(Parameters(analytics_params())).await;
    assert!(result.is_ok());

    let calls = gateway.analytics_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].account_id, "507");
    assert_eq!(calls[0].pivot.as_deref(), Some("CAMPAIGN"));
    assert_eq!(calls[0].time_granularity, Some(TimeGranularity::Daily));
    assert_eq!(
        calls[0].fields,
        vec!["impressions".to_string(), "clicks".to_string()]
    );
}

#[tokio::test]
async fn gateway_error_message_is_returned() {
    let gateway = Arc::new(MockAdsGateway::default());
    gateway
        .set_error(Some(ApiError::ApiResponse {
            status: 401,
            body: ErrorBody::Text("invalid token".to_string()),
        }))
        .await;
    let server = build_server(Arc::clone(&gateway) as Arc<dyn AdsGateway>, None, TEST_TIMEOUT);

    let error = server
        .get_analytics(Parameters(analytics_params()))
        .await
        .unwrap_err();

    let message = error.to_string();
    assert!(message.contains("status 401"));
    assert!(message.contains("invalid token"));
}

#[tokio::test]
async fn slow_gateway_hits_tool_timeout() {
    let gateway = Arc::new(MockAdsGateway::default());
    gateway.set_delay(Some(Duration::from_millis(50))).await;
    let server = build_server(
        Arc::clone(&gateway) as Arc<dyn AdsGateway>,
        None,
        Duration::from_millis(5),
    );

    let error = server
        .search_ad_accounts(Parameters(SearchAdAccountsParams::default()))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("Search ad accounts timeout"));
}

#[tokio::test]
async fn repository_gateway_routes_to_linkedin_endpoints() {
    let client = Arc::new(CannedHttpClient::new(
        200,
        serde_json::json!({"elements": [], "paging": {}, "metadata": {}}),
    ));
    let gateway = repository_gateway(Arc::clone(&client));
    let server = build_server(Arc::new(gateway), Some("507"), TEST_TIMEOUT);

    assert!(server
        .search_ad_accounts(Parameters(SearchAdAccountsParams::default()))
        .await
        .is_ok());
    assert!(server
        .search_campaigns(Parameters(SearchCampaignsParams::default()))
        .await
        .is_ok());
    assert!(server
        .get_analytics(Parameters(analytics_params()))
        .await
        .is_ok());

    let urls = client.urls().await;
    assert_eq!(urls.len(), 3);
    assert!(urls[0].starts_with("https://api.test/rest/adAccounts?q=search"));
    assert!(urls[1].starts_with("https://api.test/rest/adAccounts/507/adCampaigns?q=search"));
    assert!(urls[2].starts_with("https://api.test/rest/adAnalytics?q=analytics"));
}

#[test]
fn get_info_contains_expected_instructions() {
    let server = build_server(Arc::new(MockAdsGateway::default()), None, TEST_TIMEOUT);

    let info = server.get_info();

    assert_eq!(info.protocol_version, ProtocolVersion::LATEST);
    assert!(info.capabilities.tools.is_some());
    let instructions = info.instructions.unwrap_or_default();
    assert!(instructions.contains("search_ad_accounts"));
    assert!(instructions.contains("get_analytics"));
}

#[tokio::test]
async fn run_tool_success_returns_json() {
    let future = async { Ok::<_, ApiError>("hello".to_string()) };
    let result = run_tool(Duration::from_secs(1), future, "test tool")
        .await
        .unwrap();
    let text = &result.content[0];
    assert!(format!("{text:?}").contains("hello"));
}

#[tokio::test]
async fn run_tool_timeout_returns_error() {
    let future = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, ApiError>("late".to_string())
    };
    let error = run_tool(Duration::from_millis(5), future, "slow tool")
        .await
        .unwrap_err();
    assert!(error.to_string().contains("slow tool timeout"));
}

#[tokio::test]
async fn run_tool_maps_api_error() {
    let future = async {
        Err::<String, _>(ApiError::NetworkError {
            detail: "conn refused".into(),
        })
    };
    let error = run_tool(Duration::from_secs(1), future, "fail tool")
        .await
        .unwrap_err();
    assert!(error.to_string().contains("conn refused"));
}
