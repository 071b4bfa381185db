//! Pieces shared by the three resources: the fixed header set, the Rest.li
//! query grammar, and the request/classify/decode flow of a repository.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorBody, Result};
use crate::traits::{ErrorLogger, HttpClient};
use crate::types::{ApiConfig, JsonObject, RequestHeaders};
use crate::utils::log_sanitizer::truncate_for_log;

// ============ Headers ============

pub(crate) const HEADER_AUTHORIZATION: &str = "Authorization";
pub(crate) const HEADER_LINKEDIN_VERSION: &str = "LinkedIn-Version";
pub(crate) const HEADER_RESTLI_PROTOCOL_VERSION: &str = "X-Restli-Protocol-Version";
pub(crate) const HEADER_ACCEPT: &str = "Accept";

pub(crate) const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";
pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";

/// The four headers every LinkedIn request carries.
pub(crate) fn build_headers(config: &ApiConfig) -> RequestHeaders {
    [
        (HEADER_AUTHORIZATION, config.access_token.as_str()),
        (HEADER_LINKEDIN_VERSION, config.version.as_str()),
        (HEADER_RESTLI_PROTOCOL_VERSION, RESTLI_PROTOCOL_VERSION),
        (HEADER_ACCEPT, CONTENT_TYPE_JSON),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

// ============ URL ============

/// `{base_url}{path}` with any trailing `/` of the base removed.
pub(crate) fn endpoint(config: &ApiConfig, path: &str) -> String {
    format!("{}{path}", config.base_url.trim_end_matches('/'))
}

/// Percent-encode a single path segment or query value.
pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Trimmed, non-blank values of a list filter.
pub(crate) fn cleaned(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Envelope `elements`, with `null` entries skipped.
pub(crate) fn present_elements(elements: Option<Vec<Option<JsonObject>>>) -> Vec<JsonObject> {
    elements.into_iter().flatten().flatten().collect()
}

/// Ordered `key=value` pairs joined with `&`.
///
/// Values are written as given; callers decide per parameter whether to
/// percent-encode, since the Rest.li structures must stay literal.
#[derive(Debug, Default)]
pub(crate) struct QueryString {
    params: Vec<String>,
}

impl QueryString {
    pub fn new(finder: &str) -> Self {
        Self {
            params: vec![format!("q={finder}")],
        }
    }

    /// Append a parameter verbatim.
    pub fn raw(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.params.push(format!("{key}={}", value.as_ref()));
        self
    }

    /// Append a percent-encoded parameter, skipped when blank.
    pub fn encoded(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.params.push(format!("{key}={}", encode(value)));
        }
        self
    }

    /// Append a numeric parameter, skipped when zero.
    pub fn positive(&mut self, key: &str, value: u32) -> &mut Self {
        if value > 0 {
            self.params.push(format!("{key}={value}"));
        }
        self
    }

    pub fn finish(&self) -> String {
        self.params.join("&")
    }
}

/// Builder of the composite `search=(...)` parameter.
///
/// `search=(status:(values:List(ACTIVE,PAUSED)),test:false)`. The result is
/// never percent-encoded: the provider parses the parentheses and colons.
#[derive(Debug, Default)]
pub(crate) struct SearchCriteria {
    parts: Vec<String>,
}

impl SearchCriteria {
    /// `field:(values:List(v1,v2))`, skipped when no value survives trimming.
    pub fn list(&mut self, field: &str, values: &[String]) -> &mut Self {
        let values = cleaned(values);
        if !values.is_empty() {
            self.parts
                .push(format!("{field}:(values:List({}))", values.join(",")));
        }
        self
    }

    /// `field:true|false`, skipped when unset.
    pub fn flag(&mut self, field: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.parts.push(format!("{field}:{value}"));
        }
        self
    }

    /// Value of the `search` parameter, `None` when no criterion was added.
    pub fn build(&self) -> Option<String> {
        if self.parts.is_empty() {
            None
        } else {
            Some(format!("({})", self.parts.join(",")))
        }
    }
}

// ============ Repository flow ============

const LOG_MESSAGE_FAILED_REQUEST: &str = "failed to make request";
const LOG_MESSAGE_API_ERROR: &str = "linkedin api responded with error";
const LOG_MESSAGE_FAILED_DECODE_RESPONSE: &str = "failed to decode response";

pub(crate) const LOG_TAG_URL: &str = "url";
pub(crate) const LOG_TAG_ERROR: &str = "error";
pub(crate) const LOG_TAG_STATUS: &str = "status";
pub(crate) const LOG_TAG_BODY: &str = "body";

/// Forward to the logger when one is configured.
pub(crate) fn log_error(logger: Option<&Arc<dyn ErrorLogger>>, message: &str, tags: &[(&str, String)]) {
    if let Some(logger) = logger {
        logger.error(message, tags);
    }
}

/// GET `url`, reject non-2xx responses and decode the envelope.
pub(crate) async fn fetch_envelope<C, T>(
    client: &C,
    logger: Option<&Arc<dyn ErrorLogger>>,
    url: &str,
    headers: &RequestHeaders,
) -> Result<T>
where
    C: HttpClient,
    T: DeserializeOwned,
{
    let response = match client.get(url, headers).await {
        Ok(response) => response,
        Err(e) => {
            log_error(
                logger,
                LOG_MESSAGE_FAILED_REQUEST,
                &[(LOG_TAG_URL, url.to_string()), (LOG_TAG_ERROR, e.to_string())],
            );
            return Err(ApiError::RequestFailed {
                url: url.to_string(),
                source: Box::new(e),
            });
        }
    };

    if !response.is_success() {
        let body_text = response.text();
        let body_text = body_text.trim();

        let mut tags = vec![
            (LOG_TAG_URL, url.to_string()),
            (LOG_TAG_STATUS, response.status.to_string()),
        ];
        if !body_text.is_empty() {
            tags.push((LOG_TAG_BODY, truncate_for_log(body_text)));
        }
        log_error(logger, LOG_MESSAGE_API_ERROR, &tags);

        return Err(ApiError::ApiResponse {
            status: response.status,
            body: ErrorBody::from_bytes(&response.body),
        });
    }

    response.json().map_err(|e| {
        log_error(
            logger,
            LOG_MESSAGE_FAILED_DECODE_RESPONSE,
            &[(LOG_TAG_URL, url.to_string()), (LOG_TAG_ERROR, e.to_string())],
        );
        ApiError::ParseError {
            detail: e.to_string(),
        }
    })
}
