//! Campaign search under an ad account
//! (`GET /adAccounts/{id}/adCampaigns?q=search`).

mod query;
mod repository;
mod types;

pub use query::CampaignsQueryBuilder;
pub use repository::CampaignsRepository;
pub use types::{CampaignSearch, CampaignSearchMetadata, CampaignSearchResult};
