use serde::{Deserialize, Serialize};

/// Scalar fundamentals shown when a symbol is clicked. Never cached.
///
/// Fields are optional because the backend reports `null` for ratios it
/// cannot compute (a P/E for negative earnings, for instance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDetail {
    pub current_price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub eps: Option<f64>,
    pub market_cap: Option<f64>,
}

impl SymbolDetail {
    pub fn heading(symbol: &str) -> String {
        format!("Financials for {}", symbol)
    }

    /// The four labeled lines of the detail panel, in display order.
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Price: {}", display_value(self.current_price)),
            format!("P/E Ratio: {}", display_value(self.pe_ratio)),
            format!("EPS: {}", display_value(self.eps)),
            format!("Market Capital: {}", display_value(self.market_cap)),
        ]
    }
}

fn display_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => "N/A".to_string(),
    }
}
