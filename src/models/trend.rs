use serde::{Deserialize, Serialize};

/// One of the three fixed symbol rankings the backend publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendCategory {
    High,
    Low,
    Volume,
}

impl TrendCategory {
    pub const ALL: [TrendCategory; 3] = [TrendCategory::High, TrendCategory::Low, TrendCategory::Volume];

    /// Path relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            TrendCategory::High => "/homepage/trending/high",
            TrendCategory::Low => "/homepage/trending/low",
            TrendCategory::Volume => "/homepage/trending/volume",
        }
    }

    pub fn region_id(self) -> &'static str {
        match self {
            TrendCategory::High => "high-list",
            TrendCategory::Low => "low-list",
            TrendCategory::Volume => "volume-list",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TrendCategory::High => "52-Week High Stocks",
            TrendCategory::Low => "52-Week Low Stocks",
            TrendCategory::Volume => "Volume Surge Stocks",
        }
    }
}

impl std::fmt::Display for TrendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendCategory::High => write!(f, "high"),
            TrendCategory::Low => write!(f, "low"),
            TrendCategory::Volume => write!(f, "volume"),
        }
    }
}
