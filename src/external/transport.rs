use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::DashboardError;

/// A JSON-over-HTTP GET. The only way the dashboard talks to its backends.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, DashboardError>;
}

/// `Transport` backed by a shared `reqwest::Client`. No timeout, no retry.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, DashboardError> {
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DashboardError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| DashboardError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| DashboardError::malformed(url.as_str(), e))
    }
}
