use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Header set passed to a request. Names are matched case-insensitively when sent.
pub type RequestHeaders = HashMap<String, String>;

/// A JSON object whose schema is owned by the provider.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

// ============ Transport ============

/// Raw HTTP response returned by an [`HttpClient`](crate::HttpClient).
///
/// A response is returned for every status code. Classifying 4xx/5xx into
/// errors is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, lower-case names, all values per name in arrival order.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status is in `200..300`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// First value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

// ============ Provider API ============

/// LinkedIn Marketing API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/rest";

/// `LinkedIn-Version` header value used when none is configured.
pub const DEFAULT_API_VERSION: &str = "202505";

/// Connection settings shared by every query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL of the REST API, with or without a trailing `/`.
    pub base_url: String,
    /// Value of the `LinkedIn-Version` header (`YYYYMM`).
    pub version: String,
    /// Value of the `Authorization` header, sent verbatim.
    pub access_token: String,
}

impl ApiConfig {
    /// Configuration against the public API with the default version.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Override the base URL (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the `LinkedIn-Version` header.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

// ============ Search parameters ============

/// Sort direction accepted by the search finders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASCENDING",
            Self::Descending => "DESCENDING",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "ASCENDING" => Ok(Self::Ascending),
            "DESCENDING" => Ok(Self::Descending),
            other => Err(format!(
                "invalid sort order: {other}. Must be ASCENDING or DESCENDING"
            )),
        }
    }
}
