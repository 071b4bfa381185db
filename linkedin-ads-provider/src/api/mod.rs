//! LinkedIn Marketing API resources.
//!
//! Each resource pairs a pure query builder, turning a typed request into a
//! URL and header set, with a repository that executes it through an
//! [`HttpClient`](crate::HttpClient) and normalizes the envelope.

pub(crate) mod common;

pub mod adaccounts;
pub mod campaigns;
pub mod reporting;
