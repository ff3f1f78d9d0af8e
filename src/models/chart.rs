use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PriceSeries;

pub const OPEN_PRICE_LABEL: &str = "Open Price";
pub const CLOSE_PRICE_LABEL: &str = "Close Price";
pub const X_AXIS_TITLE: &str = "Timestamp";
pub const Y_AXIS_TITLE: &str = "Price (USD)";
pub const MAX_X_TICKS: usize = 10;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
}

/// Labels plus the two line datasets derived from a price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            labels: series.timestamps.clone(),
            datasets: vec![
                Dataset {
                    label: OPEN_PRICE_LABEL.to_string(),
                    data: series.open.clone(),
                    border_color: "#3b82f6".to_string(),
                },
                Dataset {
                    label: CLOSE_PRICE_LABEL.to_string(),
                    data: series.close.clone(),
                    border_color: "#10b981".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub x_title: String,
    pub y_title: String,
    pub max_ticks_limit: usize,
    pub auto_skip: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            max_ticks_limit: MAX_X_TICKS,
            auto_skip: true,
        }
    }
}

/// A live line chart bound to a canvas. Mutated in place after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub instance_id: u64,
    pub canvas_id: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
    /// Number of redraws since construction.
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl Chart {
    pub fn new(canvas_id: impl Into<String>, data: ChartData, options: ChartOptions) -> Self {
        Self {
            instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            canvas_id: canvas_id.into(),
            labels: data.labels,
            datasets: data.datasets,
            options,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    /// Replaces labels and datasets without touching identity or options.
    pub fn set_data(&mut self, data: ChartData) {
        self.labels = data.labels;
        self.datasets = data.datasets;
    }

    pub fn redraw(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }

    /// X-axis labels left after auto-skipping down to `max_ticks_limit`.
    pub fn visible_ticks(&self) -> Vec<&str> {
        let limit = self.options.max_ticks_limit.max(1);
        let len = self.labels.len();
        if !self.options.auto_skip || len <= limit {
            return self.labels.iter().map(String::as_str).take(limit).collect();
        }
        let step = len.div_ceil(limit);
        self.labels.iter().step_by(step).map(String::as_str).collect()
    }

    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStatus {
    Uninitialized,
    Initialized,
}

/// The single chart of a page session.
#[derive(Debug, Default)]
pub enum ChartSlot {
    #[default]
    Uninitialized,
    Initialized(Chart),
}

impl ChartSlot {
    pub fn status(&self) -> ChartStatus {
        match self {
            ChartSlot::Uninitialized => ChartStatus::Uninitialized,
            ChartSlot::Initialized(_) => ChartStatus::Initialized,
        }
    }

    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartSlot::Uninitialized => None,
            ChartSlot::Initialized(chart) => Some(chart),
        }
    }

    /// Constructs the chart on first use, otherwise updates it in place.
    /// Returns the status the slot held before the call.
    pub fn apply(&mut self, canvas_id: &str, data: ChartData) -> ChartStatus {
        match self {
            ChartSlot::Initialized(chart) => {
                chart.set_data(data);
                chart.redraw();
                ChartStatus::Initialized
            }
            ChartSlot::Uninitialized => {
                *self = ChartSlot::Initialized(Chart::new(canvas_id, data, ChartOptions::default()));
                ChartStatus::Uninitialized
            }
        }
    }
}
