//! Ad account search (`GET /adAccounts?q=search`).

mod query;
mod repository;
mod types;

pub use query::AdAccountsQueryBuilder;
pub use repository::AdAccountsRepository;
pub use types::{AdAccountSearch, AdAccountSearchResult};

pub(crate) const AD_ACCOUNTS_PATH: &str = "/adAccounts";
