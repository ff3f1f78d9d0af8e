use tracing::{error, info};

use crate::errors::DashboardError;
use crate::external::MarketApi;
use crate::models::NewsItem;
use crate::ui::{Element, SharedPage, CAROUSEL_TRACK};

pub fn news_card(item: &NewsItem) -> Element {
    let content = Element::new("div")
        .class("news-card-content")
        .child(Element::new("h4").text(&item.headline))
        .child(
            Element::new("p")
                .child(Element::new("strong").text("Source:"))
                .child(Element::new("span").text(format!(" {}", item.source))),
        )
        .child(Element::new("p").text(&item.summary))
        .child(
            Element::new("a")
                .attr("href", &item.url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text("Read more"),
        );

    Element::new("div")
        .class("news-card")
        .child(
            Element::new("img")
                .attr("src", &item.image)
                .attr("alt", &item.headline),
        )
        .child(content)
}

/// Fills the carousel track with one card per news item.
#[derive(Clone)]
pub struct NewsLoader {
    api: MarketApi,
    page: SharedPage,
}

impl NewsLoader {
    pub fn new(api: MarketApi, page: SharedPage) -> Self {
        Self { api, page }
    }

    pub async fn try_load(&self) -> Result<usize, DashboardError> {
        self.page.read().require(CAROUSEL_TRACK)?;

        let items = self.api.news().await?;
        let cards: Vec<Element> = items.iter().map(news_card).collect();
        let count = cards.len();

        self.page.write().replace_children(CAROUSEL_TRACK, cards)?;
        Ok(count)
    }

    pub async fn load(&self) -> Option<usize> {
        match self.try_load().await {
            Ok(count) => {
                info!(count, "Rendered news carousel");
                Some(count)
            }
            Err(e) => {
                error!(kind = e.kind(), "Failed to fetch news: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{StubResponse, StubTransport};
    use crate::ui::Page;
    use serde_json::json;
    use std::sync::Arc;

    const NEWS: &str = "http://api.test/homepage/news";

    fn item(headline: &str) -> serde_json::Value {
        json!({
            "image": format!("https://img.test/{}.jpg", headline.len()),
            "headline": headline,
            "source": "Reuters",
            "summary": "Markets moved.",
            "url": "https://news.test/story",
        })
    }

    #[tokio::test]
    async fn test_cards_carry_all_fields() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(NEWS, json!([item("Chipmakers rally"), item("Oil slips")]));
        let page = Page::standard().shared();
        let loader = NewsLoader::new(MarketApi::new(stub, "http://api.test"), page.clone());

        assert_eq!(loader.load().await, Some(2));

        let page = page.read();
        let card = &page.children(CAROUSEL_TRACK)[0];
        assert_eq!(card.class.as_deref(), Some("news-card"));
        let img = card.find("img").unwrap();
        assert_eq!(img.get_attr("alt"), Some("Chipmakers rally"));
        assert_eq!(card.find("h4").unwrap().text.as_deref(), Some("Chipmakers rally"));
        assert_eq!(card.find("strong").unwrap().text.as_deref(), Some("Source:"));
        let link = card.find("a").unwrap();
        assert_eq!(link.get_attr("href"), Some("https://news.test/story"));
        assert_eq!(link.get_attr("target"), Some("_blank"));
    }

    #[tokio::test]
    async fn test_empty_array_clears_carousel() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(NEWS, json!([item("Old story")]));
        let page = Page::standard().shared();
        let loader = NewsLoader::new(MarketApi::new(stub.clone(), "http://api.test"), page.clone());
        loader.load().await;

        stub.respond_json(NEWS, json!([]));
        assert_eq!(loader.load().await, Some(0));
        assert!(page.read().children(CAROUSEL_TRACK).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_cards() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(NEWS, json!([item("Kept")]));
        let page = Page::standard().shared();
        let loader = NewsLoader::new(MarketApi::new(stub.clone(), "http://api.test"), page.clone());
        loader.load().await;

        stub.respond(NEWS, StubResponse::Raw("{not json".into()));
        assert_eq!(loader.try_load().await.unwrap_err().kind(), "malformed");
        assert_eq!(page.read().children(CAROUSEL_TRACK).len(), 1);
    }
}
