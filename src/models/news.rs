use serde::{Deserialize, Serialize};

/// A single carousel entry as returned by `/homepage/news`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub image: String,
    pub headline: String,
    pub source: String,
    pub summary: String,
    pub url: String,
}
