use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{info, warn};

use super::chart_service::{ChartController, ChartUpdate};
use super::detail_service::DetailResolver;
use super::news_service::NewsLoader;
use super::symbol_list_service::SymbolListLoader;
use crate::config::DashboardConfig;
use crate::external::{MarketApi, PricingApi, Transport};
use crate::models::{SymbolDetail, TrendCategory};
use crate::ui::{Page, SharedPage, UiAction, CHART_CANVAS, DEFAULT_TICKERS, TICKER_SELECT};

#[derive(Debug)]
pub struct PageLoadReport {
    pub lists: Vec<(TrendCategory, Option<usize>)>,
    pub news: Option<usize>,
    pub chart: ChartUpdate,
}

/// The whole pipeline wired to one page: trend lists, detail lookups, the
/// news carousel and the price chart.
pub struct Dashboard {
    page: SharedPage,
    symbol_lists: SymbolListLoader,
    details: DetailResolver,
    news: NewsLoader,
    chart: Arc<ChartController>,
    chart_task: Mutex<Option<AbortHandle>>,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig, transport: Arc<dyn Transport>, page: Page) -> Self {
        let page = page.shared();
        let market = MarketApi::new(transport.clone(), config.api_base_url.clone());
        let pricing = PricingApi::new(transport, config.pricing_api_url.clone());

        Self {
            symbol_lists: SymbolListLoader::new(market.clone(), page.clone()),
            details: DetailResolver::new(market.clone(), page.clone()),
            news: NewsLoader::new(market, page.clone()),
            chart: Arc::new(ChartController::new(pricing, page.clone(), CHART_CANVAS)),
            chart_task: Mutex::new(None),
            page,
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn chart(&self) -> &ChartController {
        &self.chart
    }

    pub fn symbol_lists(&self) -> &SymbolListLoader {
        &self.symbol_lists
    }

    pub fn details(&self) -> &DetailResolver {
        &self.details
    }

    pub fn news(&self) -> &NewsLoader {
        &self.news
    }

    fn current_ticker(&self) -> String {
        self.page
            .read()
            .selector_value(TICKER_SELECT)
            .unwrap_or(DEFAULT_TICKERS[0])
            .to_string()
    }

    /// Runs every page-load trigger concurrently. None of them can fail the
    /// others.
    pub async fn on_page_load(&self) -> PageLoadReport {
        let ticker = self.current_ticker();
        info!(ticker, "Loading dashboard");

        let (lists, news, chart) = tokio::join!(
            self.symbol_lists.load_all(),
            self.news.load(),
            self.chart.update(&ticker),
        );
        PageLoadReport { lists, news, chart }
    }

    pub fn click_action(&self, region_id: &str, index: usize) -> Option<UiAction> {
        self.page.read().click_action(region_id, index).cloned()
    }

    pub async fn dispatch(&self, action: UiAction) -> Option<SymbolDetail> {
        match action {
            UiAction::ResolveDetail(symbol) => self.details.resolve(&symbol).await,
        }
    }

    /// Handles a click on the `index`-th item of `region_id`.
    pub async fn on_symbol_click(&self, region_id: &str, index: usize) -> Option<SymbolDetail> {
        let Some(action) = self.click_action(region_id, index) else {
            warn!(region_id, index, "Click on an element without an action");
            return None;
        };
        self.dispatch(action).await
    }

    /// Records the new selection and starts a chart update for it, aborting
    /// the update still in flight for the previous selection.
    ///
    /// The chart token is issued here, before the task is spawned, so the
    /// last call always holds the latest token however the tasks are
    /// scheduled.
    pub fn on_selector_change(&self, ticker: &str) -> JoinHandle<ChartUpdate> {
        let mut chart_task = self.chart_task.lock();

        if let Err(e) = self.page.write().set_selector_value(TICKER_SELECT, ticker) {
            warn!(ticker, "Ticker selector unavailable: {}", e);
        }

        let token = self.chart.begin();
        let chart = self.chart.clone();
        let owned = ticker.to_string();
        let handle = tokio::spawn(async move { chart.update_with_token(&owned, token).await });

        if let Some(previous) = chart_task.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }
}
