use serde::{Deserialize, Serialize};

use crate::api::common::present_elements;
use crate::types::{JsonObject, SortOrder};

/// Filters of the ad account search finder.
///
/// Empty lists, `None` and zero values are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdAccountSearch {
    /// Account statuses (`DRAFT`, `ACTIVE`, ...).
    pub status: Vec<String>,
    /// `Some(true)` for test accounts only, `Some(false)` to exclude them.
    pub test: Option<bool>,
    /// Numeric ad account ids.
    pub account_ids: Vec<String>,
    /// Owning organization or person URNs.
    pub references: Vec<String>,
    /// Exact account names.
    pub names: Vec<String>,
    pub sort_field: Option<String>,
    /// Only sent together with `sort_field`.
    pub sort_order: Option<SortOrder>,
    pub start: u32,
    pub count: u32,
}

/// Page of ad accounts, elements and paging as returned by LinkedIn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdAccountSearchResult {
    pub elements: Vec<JsonObject>,
    pub paging: JsonObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdAccountsEnvelope {
    #[serde(default)]
    pub elements: Option<Vec<Option<JsonObject>>>,
    #[serde(default)]
    pub paging: Option<JsonObject>,
}

impl From<AdAccountsEnvelope> for AdAccountSearchResult {
    fn from(envelope: AdAccountsEnvelope) -> Self {
        Self {
            elements: present_elements(envelope.elements),
            paging: envelope.paging.unwrap_or_default(),
        }
    }
}
