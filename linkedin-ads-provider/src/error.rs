use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a non-2xx provider response, parsed on a best-effort basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ErrorBody {
    /// The body was valid JSON (usually `{"status":..,"code":..,"message":..}`).
    Json(serde_json::Value),
    /// The body was non-empty text that is not JSON (already trimmed).
    Text(String),
    /// The body was empty or whitespace only.
    Empty,
}

impl ErrorBody {
    /// Classify a raw response body.
    pub fn from_bytes(body: &[u8]) -> Self {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
            return Self::Json(value);
        }

        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }
}

/// Unified error type for every LinkedIn API operation.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError) and [`Timeout`](Self::Timeout) are
/// produced per attempt and retried by the HTTP client with exponential
/// backoff. Once retries run out they surface wrapped in
/// [`RetriesExhausted`](Self::RetriesExhausted).
///
/// Retryable HTTP statuses (408, 429, 5xx) are NOT errors at the transport
/// level: after the last attempt the response is returned as-is and the
/// repository turns it into [`ApiResponse`](Self::ApiResponse).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// The request body could not be encoded as JSON. Never retried.
    #[error("failed to marshal request body: {detail}")]
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The request could not be built (invalid URL, header name or value). Never retried.
    #[error("failed to create request: {detail}")]
    InvalidRequest {
        /// Details about what is malformed.
        detail: String,
    },

    /// A network-level failure (connection refused, reset, body read failure).
    #[error("request failed: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// Every attempt failed at the network level.
    #[error("max retries exceeded after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made (`max_retries + 1`).
        attempts: u32,
        /// Error of the final attempt.
        #[source]
        last: Box<ApiError>,
    },

    /// A repository call failed before any response was received.
    #[error("failed to make request: {source}")]
    RequestFailed {
        /// URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<ApiError>,
    },

    /// The provider answered with a non-2xx status.
    #[error("linkedin api error: status {status}{}", format_error_body(.body))]
    ApiResponse {
        /// HTTP status code.
        status: u16,
        /// Parsed or raw response body.
        body: ErrorBody,
    },

    /// The response envelope could not be decoded.
    #[error("failed to decode response: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// One analytics element could not be decoded; the whole batch is discarded.
    #[error("failed to decode analytics element {index}: {detail}")]
    ElementDecodeError {
        /// Position of the element in the `elements` array.
        index: usize,
        /// Details about the decode failure.
        detail: String,
    },
}

fn format_error_body(body: &ErrorBody) -> String {
    match body {
        ErrorBody::Json(value) => format!(", body: {value}"),
        ErrorBody::Text(text) => format!(", body: {text}"),
        ErrorBody::Empty => String::new(),
    }
}

impl ApiError {
    /// Whether the error is a transient, per-attempt transport failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }

    /// HTTP status of a provider error response, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_json() {
        let body = ErrorBody::from_bytes(br#"{"status":401,"message":"Invalid access token"}"#);
        assert_eq!(
            body,
            ErrorBody::Json(serde_json::json!({"status": 401, "message": "Invalid access token"}))
        );
    }

    #[test]
    fn error_body_text_is_trimmed() {
        let body = ErrorBody::from_bytes(b"  upstream unavailable \n");
        assert_eq!(body, ErrorBody::Text("upstream unavailable".to_string()));
    }

    #[test]
    fn error_body_blank_is_empty() {
        assert_eq!(ErrorBody::from_bytes(b""), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_bytes(b" \t\n"), ErrorBody::Empty);
    }

    #[test]
    fn display_api_response_with_json_body() {
        let e = ApiError::ApiResponse {
            status: 403,
            body: ErrorBody::Json(serde_json::json!({"code": "ACCESS_DENIED"})),
        };
        assert_eq!(
            e.to_string(),
            r#"linkedin api error: status 403, body: {"code":"ACCESS_DENIED"}"#
        );
    }

    #[test]
    fn display_api_response_with_text_body() {
        let e = ApiError::ApiResponse {
            status: 502,
            body: ErrorBody::Text("Bad Gateway".to_string()),
        };
        assert_eq!(e.to_string(), "linkedin api error: status 502, body: Bad Gateway");
    }

    #[test]
    fn display_api_response_without_body() {
        let e = ApiError::ApiResponse {
            status: 404,
            body: ErrorBody::Empty,
        };
        assert_eq!(e.to_string(), "linkedin api error: status 404");
    }

    #[test]
    fn display_request_failed_wraps_retries_exhausted() {
        let e = ApiError::RequestFailed {
            url: "https://api.linkedin.com/rest/adAccounts".to_string(),
            source: Box::new(ApiError::RetriesExhausted {
                attempts: 4,
                last: Box::new(ApiError::NetworkError {
                    detail: "connection refused".to_string(),
                }),
            }),
        };
        assert_eq!(
            e.to_string(),
            "failed to make request: max retries exceeded after 4 attempts: request failed: connection refused"
        );
    }

    #[test]
    fn display_element_decode_error() {
        let e = ApiError::ElementDecodeError {
            index: 2,
            detail: "expected an object".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to decode analytics element 2: expected an object"
        );
    }

    #[test]
    fn retryable_classes() {
        assert!(
            ApiError::NetworkError {
                detail: "reset".into()
            }
            .is_retryable()
        );
        assert!(
            ApiError::Timeout {
                detail: "30s".into()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::SerializationError {
                detail: "x".into()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::ParseError {
                detail: "x".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn status_only_for_api_response() {
        let e = ApiError::ApiResponse {
            status: 429,
            body: ErrorBody::Empty,
        };
        assert_eq!(e.status(), Some(429));
        assert_eq!(
            ApiError::ParseError {
                detail: "x".into()
            }
            .status(),
            None
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ApiError::Timeout {
            detail: "30s elapsed".to_string(),
        };
        let json = serde_json::to_value(&e).unwrap_or_default();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["detail"], "30s elapsed");
    }
}
