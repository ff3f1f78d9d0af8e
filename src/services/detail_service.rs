use tracing::{error, info};

use crate::errors::DashboardError;
use crate::external::MarketApi;
use crate::models::SymbolDetail;
use crate::ui::{Element, SharedPage, DETAIL_PANEL};

/// Panel contents: a heading plus one paragraph per labeled field.
pub fn detail_panel(symbol: &str, detail: &SymbolDetail) -> Vec<Element> {
    let mut elements = vec![Element::new("h4").text(SymbolDetail::heading(symbol))];
    elements.extend(
        detail
            .lines()
            .into_iter()
            .map(|line| Element::new("p").class("detail-line").text(line)),
    );
    elements
}

/// Looks up fundamentals for a clicked symbol and shows them in the
/// non-blocking detail panel. Every call hits the backend.
#[derive(Clone)]
pub struct DetailResolver {
    api: MarketApi,
    page: SharedPage,
}

impl DetailResolver {
    pub fn new(api: MarketApi, page: SharedPage) -> Self {
        Self { api, page }
    }

    pub async fn try_resolve(&self, symbol: &str) -> Result<SymbolDetail, DashboardError> {
        self.page.read().require(DETAIL_PANEL)?;

        let detail = self.api.symbol_detail(symbol).await?;
        self.page
            .write()
            .replace_children(DETAIL_PANEL, detail_panel(symbol, &detail))?;
        Ok(detail)
    }

    pub async fn resolve(&self, symbol: &str) -> Option<SymbolDetail> {
        match self.try_resolve(symbol).await {
            Ok(detail) => {
                info!(symbol, "Showing financials");
                Some(detail)
            }
            Err(e) => {
                error!(symbol, kind = e.kind(), "Error fetching details for {}: {}", symbol, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::StubTransport;
    use crate::ui::Page;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_panel_shows_labeled_fields() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            "http://api.test/homepage/details/AMD",
            json!({"currentPrice": 160.25, "peRatio": 230.1, "eps": 0.7, "marketCap": 2.6e11}),
        );
        let page = Page::standard().shared();
        let resolver = DetailResolver::new(MarketApi::new(stub, "http://api.test"), page.clone());

        let detail = resolver.resolve("AMD").await.unwrap();
        assert_eq!(detail.eps, Some(0.7));

        let page = page.read();
        let texts: Vec<_> = page
            .children(DETAIL_PANEL)
            .iter()
            .map(|e| e.text.clone().unwrap())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Financials for AMD",
                "Price: 160.25",
                "P/E Ratio: 230.1",
                "EPS: 0.7",
                "Market Capital: 260000000000",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_panel_untouched() {
        let stub = Arc::new(StubTransport::new());
        let page = Page::standard().shared();
        page.write()
            .replace_children(DETAIL_PANEL, vec![Element::new("h4").text("Financials for DIS")])
            .unwrap();
        let resolver = DetailResolver::new(MarketApi::new(stub, "http://api.test"), page.clone());

        assert!(resolver.resolve("ZZZZ").await.is_none());
        assert_eq!(
            page.read().children(DETAIL_PANEL)[0].text.as_deref(),
            Some("Financials for DIS")
        );
    }
}
