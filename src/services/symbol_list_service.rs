use futures::future::join_all;
use tracing::{error, info};

use crate::errors::DashboardError;
use crate::external::MarketApi;
use crate::models::TrendCategory;
use crate::ui::{Element, SharedPage, UiAction};

/// Renders one clickable list item for `symbol`.
pub fn symbol_item(symbol: &str) -> Element {
    Element::new("li")
        .text(symbol)
        .attr("style", "cursor: pointer")
        .on_click(UiAction::ResolveDetail(symbol.to_string()))
}

/// Fills a list region with the symbols of one trend category.
#[derive(Clone)]
pub struct SymbolListLoader {
    api: MarketApi,
    page: SharedPage,
}

impl SymbolListLoader {
    pub fn new(api: MarketApi, page: SharedPage) -> Self {
        Self { api, page }
    }

    /// Fetches `endpoint` and replaces the children of `region_id` with one
    /// item per symbol, in response order. On error the region is untouched.
    pub async fn try_load_into(&self, endpoint: &str, region_id: &str) -> Result<usize, DashboardError> {
        self.page.read().require(region_id)?;

        let symbols = self.api.symbol_list(endpoint).await?;
        let items: Vec<Element> = symbols.iter().map(|s| symbol_item(s)).collect();
        let count = items.len();

        self.page.write().replace_children(region_id, items)?;
        Ok(count)
    }

    pub async fn try_load(&self, category: TrendCategory) -> Result<usize, DashboardError> {
        self.try_load_into(category.endpoint(), category.region_id()).await
    }

    /// Like `try_load`, but failures are logged and swallowed.
    pub async fn load(&self, category: TrendCategory) -> Option<usize> {
        match self.try_load(category).await {
            Ok(count) => {
                info!(%category, count, "Rendered trending symbols");
                Some(count)
            }
            Err(DashboardError::MissingRegion(region)) => {
                error!(%category, region = %region, "Element with id '{}' not found", region);
                None
            }
            Err(e) => {
                error!(
                    endpoint = category.endpoint(),
                    kind = e.kind(),
                    "Failed to fetch {}: {}",
                    category.endpoint(),
                    e
                );
                None
            }
        }
    }

    /// Loads every category concurrently; each outcome is independent.
    pub async fn load_all(&self) -> Vec<(TrendCategory, Option<usize>)> {
        let loads = TrendCategory::ALL
            .into_iter()
            .map(|category| async move { (category, self.load(category).await) });
        join_all(loads).await
    }
}
