use reqwest::{Client, Url};
use tracing::{debug, info};

use super::types::RawDeal;
use crate::{cli::types::StoreId, cli::types::UpperPrice, DealsError, Result};

#[cfg(test)]
mod tests;

/// Deals listing endpoint of the CheapShark v1 API.
pub const DEALS_BASE_URL: &str = "https://www.cheapshark.com/api/1.0/deals";

const USER_AGENT: &str = concat!("cheapshark-deals/", env!("CARGO_PKG_VERSION"));

/// Where to fetch deals from and which listing to ask for.
#[derive(Debug, Clone, PartialEq)]
pub struct DealsEndpoint {
    pub base_url: String,
    pub store_id: StoreId,
    pub upper_price: UpperPrice,
}

impl Default for DealsEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEALS_BASE_URL.to_string(),
            store_id: StoreId::default(),
            upper_price: UpperPrice::default(),
        }
    }
}

impl DealsEndpoint {
    pub fn new(base_url: impl Into<String>, store_id: StoreId, upper_price: UpperPrice) -> Self {
        Self {
            base_url: base_url.into(),
            store_id,
            upper_price,
        }
    }

    /// Full request URL with `storeID` and `upperPrice` in the query string.
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|_| DealsError::InvalidEndpoint {
            url: self.base_url.clone(),
        })?;
        url.query_pairs_mut()
            .append_pair("storeID", &self.store_id.to_string())
            .append_pair("upperPrice", &self.upper_price.to_string());
        Ok(url)
    }
}

/// HTTP client shared by every request of a run.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Fetch one page of deals.
///
/// Transport failures and non-2xx statuses surface as [`DealsError::Http`];
/// a body that is not a JSON array of objects surfaces as
/// [`DealsError::MalformedPayload`].
pub async fn fetch_deals(client: &Client, endpoint: &DealsEndpoint) -> Result<Vec<RawDeal>> {
    let url = endpoint.url()?;
    debug!(%url, "fetching deals");

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let deals: Vec<RawDeal> = serde_json::from_slice(&body)?;
    info!(count = deals.len(), "fetched deals");
    Ok(deals)
}
