use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::transport::Transport;
use crate::errors::DashboardError;
use crate::models::{NewsItem, PriceSeries, PricingResponse, SymbolDetail, TrendCategory};

pub const NEWS_ENDPOINT: &str = "/homepage/news";
pub const DETAILS_ENDPOINT: &str = "/homepage/details";

fn decode<T: DeserializeOwned>(url: &Url, body: Value) -> Result<T, DashboardError> {
    serde_json::from_value(body).map_err(|e| DashboardError::malformed(url.as_str(), e))
}

/// A base URL that does not parse is a configuration fault, not a transport
/// one, so it is reported as malformed and never reaches the network.
fn parse_url(raw: &str) -> Result<Url, DashboardError> {
    Url::parse(raw).map_err(|e| DashboardError::malformed(raw, format!("invalid URL: {}", e)))
}

/// Typed client for the market-summary backend (`{base}/homepage/...`).
#[derive(Clone)]
pub struct MarketApi {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl MarketApi {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, endpoint: &str) -> Result<Url, DashboardError> {
        parse_url(&format!("{}{}", self.base_url, endpoint))
    }

    pub fn detail_url(&self, symbol: &str) -> Result<Url, DashboardError> {
        let mut url = self.url_for(DETAILS_ENDPOINT)?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::malformed(self.base_url.as_str(), "base URL cannot carry a path"))?
            .push(symbol);
        Ok(url)
    }

    /// Fetches a JSON array of ticker symbols from `endpoint`.
    pub async fn symbol_list(&self, endpoint: &str) -> Result<Vec<String>, DashboardError> {
        let url = self.url_for(endpoint)?;
        let body = self.transport.get_json(&url).await?;
        decode(&url, body)
    }

    pub async fn trending(&self, category: TrendCategory) -> Result<Vec<String>, DashboardError> {
        self.symbol_list(category.endpoint()).await
    }

    pub async fn symbol_detail(&self, symbol: &str) -> Result<SymbolDetail, DashboardError> {
        let url = self.detail_url(symbol)?;
        let body = self.transport.get_json(&url).await?;
        if !body.is_object() {
            return Err(DashboardError::malformed(url.as_str(), "expected a JSON object"));
        }
        decode(&url, body)
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>, DashboardError> {
        let url = self.url_for(NEWS_ENDPOINT)?;
        let body = self.transport.get_json(&url).await?;
        decode(&url, body)
    }
}

/// Client for the external historical-price API (`{base}?ticker=...`).
#[derive(Clone)]
pub struct PricingApi {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl PricingApi {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn series_url(&self, ticker: &str) -> Result<Url, DashboardError> {
        let mut url = parse_url(&self.base_url)?;
        url.query_pairs_mut().append_pair("ticker", ticker);
        Ok(url)
    }

    pub async fn price_series(&self, ticker: &str) -> Result<PriceSeries, DashboardError> {
        let url = self.series_url(ticker)?;
        let body = self.transport.get_json(&url).await?;
        let response: PricingResponse = decode(&url, body)?;
        PriceSeries::try_from(response).map_err(|e| DashboardError::malformed(url.as_str(), e))
    }
}
