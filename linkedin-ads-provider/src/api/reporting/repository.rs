use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::common::{LOG_TAG_ERROR, fetch_envelope, log_error};
use crate::error::{ApiError, Result};
use crate::traits::{ErrorLogger, HttpClient};

use super::types::{AnalyticsEnvelope, ReportedDateRange};
use super::{
    AnalyticsElement, AnalyticsQuery, AnalyticsResult, FIELD_DATE_RANGE, FIELD_PIVOT_VALUES,
    ReportingQueryBuilder,
};

const LOG_MESSAGE_FAILED_DECODE_ELEMENT: &str = "failed to decode analytics element";
const LOG_TAG_ELEMENT: &str = "element";

/// Analytics reporting over an [`HttpClient`].
pub struct ReportingRepository<C> {
    client: C,
    query_builder: ReportingQueryBuilder,
    logger: Option<Arc<dyn ErrorLogger>>,
}

impl<C: HttpClient> ReportingRepository<C> {
    pub fn new(client: C, query_builder: ReportingQueryBuilder) -> Self {
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

    /// Run the analytics finder and split every row into date range, pivot
    /// values and metrics.
    ///
    /// A single malformed row fails the whole call.
    pub async fn get_analytics(&self, input: &AnalyticsQuery) -> Result<AnalyticsResult> {
        let (url, headers) = self.query_builder.build_analytics_query(input);

        let envelope: AnalyticsEnvelope =
            fetch_envelope(&self.client, self.logger.as_ref(), &url, &headers).await?;

        let elements = envelope
            .elements
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                normalize_element(raw).map_err(|detail| {
                    log_error(
                        self.logger.as_ref(),
                        LOG_MESSAGE_FAILED_DECODE_ELEMENT,
                        &[
                            (LOG_TAG_ELEMENT, index.to_string()),
                            (LOG_TAG_ERROR, detail.clone()),
                        ],
                    );
                    ApiError::ElementDecodeError { index, detail }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalyticsResult {
            elements,
            paging: envelope.paging.unwrap_or_default(),
        })
    }
}

/// Split one raw row. `null` known keys count as absent, and so does a
/// `dateRange` with neither bound.
pub(crate) fn normalize_element(raw: Value) -> std::result::Result<AnalyticsElement, String> {
    let Value::Object(mut metrics) = raw else {
        return Err(format!("expected an object, got {}", json_kind(&raw)));
    };

    let date_range = take_known::<ReportedDateRange>(&mut metrics, FIELD_DATE_RANGE)?
        .and_then(ReportedDateRange::non_empty);
    let pivot_values = take_known(&mut metrics, FIELD_PIVOT_VALUES)?.unwrap_or_default();

    Ok(AnalyticsElement {
        date_range,
        pivot_values,
        metrics,
    })
}

fn take_known<T: DeserializeOwned>(
    element: &mut serde_json::Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<T>, String> {
    match element.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| format!("invalid {key}: {e}")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
