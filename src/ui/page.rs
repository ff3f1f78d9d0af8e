use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::errors::DashboardError;
use crate::models::TrendCategory;

pub const CAROUSEL_TRACK: &str = "carousel-track";
pub const CHART_CANVAS: &str = "stock-chart";
pub const TICKER_SELECT: &str = "ticker-select";
pub const DETAIL_PANEL: &str = "detail-panel";

pub const DEFAULT_TICKERS: [&str; 6] = ["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA"];

/// Page shared between loaders. Never hold the guard across an `.await`.
pub type SharedPage = Arc<RwLock<Page>>;

/// What happens when an element is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "symbol")]
pub enum UiAction {
    ResolveDetail(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<UiAction>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn on_click(mut self, action: UiAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for the first descendant (or self) with `tag`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    List,
    Carousel,
    Canvas,
    Selector,
    Panel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Region {
    pub id: String,
    pub kind: RegionKind,
    pub children: Vec<Element>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Region {
    pub fn new(id: &str, kind: RegionKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            children: Vec::new(),
            options: Vec::new(),
            value: None,
        }
    }

    pub fn selector(id: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            value: options.first().map(|o| o.to_string()),
            ..Self::new(id, RegionKind::Selector)
        }
    }
}

/// Addressable regions of the dashboard, keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    regions: BTreeMap<String, Region>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The dashboard layout: three trend lists, the news carousel, the chart
    /// canvas, the ticker selector and the detail panel.
    pub fn standard() -> Self {
        let mut page = Self::empty();
        for category in TrendCategory::ALL {
            page.insert(Region::new(category.region_id(), RegionKind::List));
        }
        page.insert(Region::new(CAROUSEL_TRACK, RegionKind::Carousel));
        page.insert(Region::new(CHART_CANVAS, RegionKind::Canvas));
        page.insert(Region::selector(TICKER_SELECT, &DEFAULT_TICKERS));
        page.insert(Region::new(DETAIL_PANEL, RegionKind::Panel));
        page
    }

    pub fn shared(self) -> SharedPage {
        Arc::new(RwLock::new(self))
    }

    pub fn insert(&mut self, region: Region) -> Option<Region> {
        self.regions.insert(region.id.clone(), region)
    }

    pub fn remove(&mut self, id: &str) -> Option<Region> {
        self.regions.remove(id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.regions.get_mut(id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn require(&self, id: &str) -> Result<&Region, DashboardError> {
        self.region(id)
            .ok_or_else(|| DashboardError::MissingRegion(id.to_string()))
    }

    pub fn children(&self, id: &str) -> &[Element] {
        self.region(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Clears the region and appends `elements` in order, as one step.
    pub fn replace_children(&mut self, id: &str, elements: Vec<Element>) -> Result<(), DashboardError> {
        let region = self
            .region_mut(id)
            .ok_or_else(|| DashboardError::MissingRegion(id.to_string()))?;
        region.children = elements;
        Ok(())
    }

    pub fn selector_value(&self, id: &str) -> Option<&str> {
        self.region(id).and_then(|r| r.value.as_deref())
    }

    pub fn set_selector_value(&mut self, id: &str, value: &str) -> Result<(), DashboardError> {
        let region = self
            .region_mut(id)
            .ok_or_else(|| DashboardError::MissingRegion(id.to_string()))?;
        if !region.options.iter().any(|o| o == value) {
            region.options.push(value.to_string());
        }
        region.value = Some(value.to_string());
        Ok(())
    }

    pub fn click_action(&self, id: &str, index: usize) -> Option<&UiAction> {
        self.children(id).get(index).and_then(|e| e.on_click.as_ref())
    }
}
