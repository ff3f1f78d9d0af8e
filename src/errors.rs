use http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("UI region '{0}' not found")]
    MissingRegion(String),
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },
    #[error("{url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },
    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

impl DashboardError {
    /// Stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::MissingRegion(_) => "missing_region",
            DashboardError::Network { .. } => "network",
            DashboardError::BadStatus { .. } => "bad_status",
            DashboardError::Malformed { .. } => "malformed",
        }
    }

    pub fn malformed(url: impl Into<String>, message: impl ToString) -> Self {
        DashboardError::Malformed {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        match self {
            DashboardError::MissingRegion(id) => {
                (StatusCode::NOT_FOUND, format!("Region '{}' not found", id)).into_response()
            }
            other => (StatusCode::BAD_GATEWAY, other.to_string()).into_response(),
        }
    }
}
