//! CheapShark API client: endpoint description, fetch, and raw payload types.

pub mod http;
pub mod types;

pub use http::{build_client, fetch_deals, DealsEndpoint, DEALS_BASE_URL};
pub use types::RawDeal;
