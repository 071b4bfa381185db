use serde::{Deserialize, Serialize};

use crate::types::{JsonObject, SortOrder};

/// Filters of the campaign search finder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignSearch {
    /// Ad account owning the campaigns, placed in the path.
    pub account_id: String,
    pub campaign_group_urns: Vec<String>,
    pub associated_entity_values: Vec<String>,
    pub campaign_urns: Vec<String>,
    pub status: Vec<String>,
    pub campaign_types: Vec<String>,
    pub names: Vec<String>,
    pub test: Option<bool>,
    pub sort_order: Option<SortOrder>,
    pub page_size: u32,
    /// Opaque cursor from a previous page's `next_page_token`.
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSearchMetadata {
    /// Cursor of the next page, `None` on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Page of campaigns plus the cursor of the following page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignSearchResult {
    pub elements: Vec<JsonObject>,
    pub metadata: CampaignSearchMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CampaignsEnvelope {
    #[serde(default)]
    pub elements: Option<Vec<Option<JsonObject>>>,
    #[serde(default)]
    pub paging: Option<JsonObject>,
}
