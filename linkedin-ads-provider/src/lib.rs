//! # linkedin-ads-provider
//!
//! A resilient client for the LinkedIn Marketing API: ad account search,
//! campaign search and ad analytics reporting.
//!
//! ## Layers
//!
//! | Layer | Types | Role |
//! |-------|-------|------|
//! | Transport | [`HttpClient`], [`RetryingHttpClient`] | timeout, header injection, bounded exponential backoff |
//! | Query builders | [`AdAccountsQueryBuilder`], [`CampaignsQueryBuilder`], [`ReportingQueryBuilder`] | typed request → Rest.li URL + headers |
//! | Repositories | [`AdAccountsRepository`], [`CampaignsRepository`], [`ReportingRepository`] | execute, classify, normalize |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use linkedin_ads_provider::{
//!     AdAccountSearch, AdAccountsQueryBuilder, AdAccountsRepository, ApiConfig,
//!     LogErrorLogger, RetryingHttpClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RetryingHttpClient::builder().max_retries(2).build()?;
//!     let config = ApiConfig::new("Bearer your-token");
//!
//!     let repository = AdAccountsRepository::new(client, AdAccountsQueryBuilder::new(config))
//!         .with_logger(Arc::new(LogErrorLogger));
//!
//!     let page = repository
//!         .search(&AdAccountSearch {
//!             status: vec!["ACTIVE".to_string()],
//!             count: 10,
//!             ..AdAccountSearch::default()
//!         })
//!         .await?;
//!     for account in &page.elements {
//!         println!("{:?}", account.get("name"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ApiError>`](ApiError):
//!
//! - [`ApiError::RequestFailed`]: no response could be obtained; wraps
//!   [`ApiError::RetriesExhausted`] once the transport gave up
//! - [`ApiError::ApiResponse`]: LinkedIn answered with a non-2xx status
//! - [`ApiError::ParseError`]: the response envelope could not be decoded
//! - [`ApiError::ElementDecodeError`]: one analytics row was malformed
//!
//! Transient failures (`NetworkError`, `Timeout`, and statuses 408, 429 and
//! 5xx) are retried by the transport with exponential backoff. A retryable
//! status that outlasts the retries is handed back as a plain [`Response`].

mod api;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, ErrorBody, Result};

// Re-export transport
pub use http_client::{
    HttpClientConfig, RetryingHttpClient, RetryingHttpClientBuilder, is_retryable_status,
};
pub use reqwest::Method;
pub use traits::{ErrorLogger, HttpClient, LogErrorLogger};

// Re-export shared types
pub use types::{
    ApiConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, JsonObject, RequestHeaders, Response,
    SortOrder,
};

// Re-export resources
pub use api::adaccounts::{
    AdAccountSearch, AdAccountSearchResult, AdAccountsQueryBuilder, AdAccountsRepository,
};
pub use api::campaigns::{
    CampaignSearch, CampaignSearchMetadata, CampaignSearchResult, CampaignsQueryBuilder,
    CampaignsRepository,
};
pub use api::reporting::{
    AnalyticsElement, AnalyticsPaging, AnalyticsQuery, AnalyticsResult, AnalyticsSort, Date,
    DateRange, ReportedDateRange, ReportingQueryBuilder, ReportingRepository, TimeGranularity,
};

// Re-export utils module
pub use utils::log_sanitizer;
