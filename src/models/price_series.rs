use serde::{Deserialize, Serialize};

/// Aligned open/close (and optional volume) samples for one ticker.
///
/// `timestamps[i]`, `open[i]` and `close[i]` describe the same sample; the
/// constructor refuses sequences of unequal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub timestamps: Vec<String>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl PriceSeries {
    pub fn new(
        timestamps: Vec<String>,
        open: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<Self, String> {
        let len = timestamps.len();
        if open.len() != len || close.len() != len {
            return Err(format!(
                "misaligned price series: {} timestamps, {} open, {} close",
                len,
                open.len(),
                close.len()
            ));
        }
        if !volume.is_empty() && volume.len() != len {
            return Err(format!(
                "misaligned price series: {} timestamps, {} volume",
                len,
                volume.len()
            ));
        }
        Ok(Self {
            timestamps,
            open,
            close,
            volume,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Body returned by the pricing API: `{ "price_data": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct PricingResponse {
    pub price_data: RawPriceData,
}

#[derive(Debug, Deserialize)]
pub struct RawPriceData {
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    #[serde(default)]
    pub volume: Vec<f64>,
    pub timestamp: Vec<TimestampLabel>,
}

/// Timestamps arrive as epoch numbers or preformatted strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimestampLabel {
    Text(String),
    Number(serde_json::Number),
}

impl TimestampLabel {
    pub fn into_label(self) -> String {
        match self {
            TimestampLabel::Text(s) => s,
            TimestampLabel::Number(n) => n.to_string(),
        }
    }
}

impl TryFrom<PricingResponse> for PriceSeries {
    type Error = String;

    fn try_from(response: PricingResponse) -> Result<Self, Self::Error> {
        let raw = response.price_data;
        PriceSeries::new(
            raw.timestamp.into_iter().map(TimestampLabel::into_label).collect(),
            raw.open,
            raw.close,
            raw.volume,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_timestamp_labels() {
        let body: PricingResponse = serde_json::from_str(
            r#"{"price_data":{"open":[1.0,2.0],"close":[1.5,2.5],"volume":[10,20],"timestamp":[1718000000,"2024-06-11"]}}"#,
        )
        .unwrap();
        let series = PriceSeries::try_from(body).unwrap();
        assert_eq!(series.timestamps, vec!["1718000000", "2024-06-11"]);
        assert_eq!(series.volume, vec![10.0, 20.0]);
    }

    #[test]
    fn test_rejects_misaligned_arrays() {
        let err = PriceSeries::new(
            vec!["a".into(), "b".into()],
            vec![1.0, 2.0],
            vec![1.0],
            vec![],
        )
        .unwrap_err();
        assert!(err.contains("misaligned"));

        assert!(PriceSeries::new(vec!["a".into()], vec![1.0], vec![1.0], vec![5.0, 6.0]).is_err());
    }

    #[test]
    fn test_volume_is_optional() {
        let body: PricingResponse = serde_json::from_str(
            r#"{"price_data":{"open":[1.0],"close":[1.1],"timestamp":["t0"]}}"#,
        )
        .unwrap();
        let series = PriceSeries::try_from(body).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series.volume.is_empty());
    }
}
