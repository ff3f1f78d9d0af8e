use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::errors::DashboardError;
use crate::external::PricingApi;
use crate::models::{Chart, ChartData, ChartSlot, ChartStatus};
use crate::ui::SharedPage;

/// What a single `update` call did to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "kind")]
pub enum ChartUpdate {
    /// First successful fetch; the chart was constructed.
    Initialized,
    /// Labels and datasets were replaced in place and redrawn.
    Updated,
    /// A newer update was requested before this response arrived.
    Superseded,
    /// Fetch or decode failed; the chart is unchanged.
    Failed(&'static str),
}

/// Owns the page's single chart and keeps it in step with the selector.
///
/// Each request takes a token from a monotonically increasing counter. A
/// response is only applied if its token is still the latest one issued, so
/// a slow answer for an old selection never overwrites a newer one. Callers
/// that hand the fetch to another task take the token with [`begin`] first,
/// so tokens follow the order of the requests rather than of the tasks.
///
/// [`begin`]: ChartController::begin
pub struct ChartController {
    api: PricingApi,
    page: SharedPage,
    canvas_id: String,
    slot: Mutex<ChartSlot>,
    latest_token: AtomicU64,
}

impl ChartController {
    pub fn new(api: PricingApi, page: SharedPage, canvas_id: impl Into<String>) -> Self {
        Self {
            api,
            page,
            canvas_id: canvas_id.into(),
            slot: Mutex::new(ChartSlot::Uninitialized),
            latest_token: AtomicU64::new(0),
        }
    }

    /// Issues the token for a new request. Every earlier token becomes stale.
    pub fn begin(&self) -> u64 {
        self.latest_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn update(&self, ticker: &str) -> ChartUpdate {
        let token = self.begin();
        self.update_with_token(ticker, token).await
    }

    pub async fn update_with_token(&self, ticker: &str, token: u64) -> ChartUpdate {
        match self.try_update(ticker, token).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(ticker, token, kind = e.kind(), "Failed to update chart for {}: {}", ticker, e);
                ChartUpdate::Failed(e.kind())
            }
        }
    }

    async fn try_update(&self, ticker: &str, token: u64) -> Result<ChartUpdate, DashboardError> {
        self.page.read().require(&self.canvas_id)?;

        let series = self.api.price_series(ticker).await?;

        let points = series.len();
        let previous = {
            // Checked under the slot lock so a newer response cannot land
            // between the check and the apply.
            let mut slot = self.slot.lock();
            if self.latest_token.load(Ordering::SeqCst) != token {
                debug!(ticker, token, "Discarding stale price series");
                return Ok(ChartUpdate::Superseded);
            }
            slot.apply(&self.canvas_id, ChartData::from_series(&series))
        };

        let outcome = match previous {
            ChartStatus::Uninitialized => ChartUpdate::Initialized,
            ChartStatus::Initialized => ChartUpdate::Updated,
        };
        info!(ticker, token, points, ?outcome, "Chart refreshed");
        Ok(outcome)
    }

    pub fn status(&self) -> ChartStatus {
        self.slot.lock().status()
    }

    /// Copy of the current chart, if one has been constructed.
    pub fn snapshot(&self) -> Option<Chart> {
        self.slot.lock().chart().cloned()
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token.load(Ordering::SeqCst)
    }
}
