//! MCP Server entry point for LinkedIn Ads (Read-Only)
//!
//! Starts the MCP server with stdio transport. Credentials and defaults are
//! read from `LINKEDIN_*` environment variables, see [`config::McpConfig`].

mod config;
mod schemas;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use config::McpConfig;
use linkedin_ads_provider::{
    AdAccountsQueryBuilder, AdAccountsRepository, CampaignsQueryBuilder, CampaignsRepository,
    ErrorLogger, LogErrorLogger, ReportingQueryBuilder, ReportingRepository, RetryingHttpClient,
};
use rmcp::ServiceExt;
use server::{LinkedInAdsMcp, RepositoryGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting LinkedIn Ads MCP Server (read-only mode)");

    let config = match McpConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let client = match RetryingHttpClient::with_config(config.http.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "HTTP client ready: {} retries, {:?} timeout, API version {}",
        config.http.max_retries,
        config.http.timeout,
        config.api_version
    );

    let logger: Arc<dyn ErrorLogger> = Arc::new(LogErrorLogger);
    let api = config.api_config();
    let gateway = RepositoryGateway {
        ad_accounts: AdAccountsRepository::new(
            Arc::clone(&client),
            AdAccountsQueryBuilder::new(api.clone()),
        )
        .with_logger(Arc::clone(&logger)),
        campaigns: CampaignsRepository::new(
            Arc::clone(&client),
            CampaignsQueryBuilder::new(api.clone()),
        )
        .with_logger(Arc::clone(&logger)),
        reporting: ReportingRepository::new(client, ReportingQueryBuilder::new(api))
            .with_logger(logger),
    };

    let mcp_server = LinkedInAdsMcp::new(Arc::new(gateway), config.default_account_id);

    tracing::info!("MCP server initialized with 3 tools");

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
