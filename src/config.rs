use std::net::SocketAddr;

use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PRICING_API_URL: &str = "http://localhost:5001/price";
pub const DEFAULT_HOST_ADDR: &str = "0.0.0.0:3000";

/// Endpoints the dashboard reads from, plus where the headless host listens.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Market-summary backend, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    /// Historical-price API, queried as `{pricing_api_url}?ticker=...`.
    pub pricing_api_url: String,
    pub host_addr: SocketAddr,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::build(
            std::env::var("DASHBOARD_API_BASE_URL").ok(),
            std::env::var("DASHBOARD_PRICING_API_URL").ok(),
            std::env::var("DASHBOARD_HOST_ADDR").ok(),
        )
    }

    fn build(
        api_base_url: Option<String>,
        pricing_api_url: Option<String>,
        host_addr: Option<String>,
    ) -> Result<Self, String> {
        let api_base_url = normalize_url(
            "DASHBOARD_API_BASE_URL",
            api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        let pricing_api_url = normalize_url(
            "DASHBOARD_PRICING_API_URL",
            pricing_api_url.as_deref().unwrap_or(DEFAULT_PRICING_API_URL),
        )?;
        let host_addr = host_addr
            .as_deref()
            .unwrap_or(DEFAULT_HOST_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| format!("DASHBOARD_HOST_ADDR is not a socket address: {}", e))?;

        Ok(Self {
            api_base_url,
            pricing_api_url,
            host_addr,
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            pricing_api_url: DEFAULT_PRICING_API_URL.to_string(),
            host_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

fn normalize_url(key: &str, raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| format!("{} is not a valid URL: {}", key, e))?;
    Ok(trimmed.to_string())
}
