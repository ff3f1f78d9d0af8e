pub mod html;
mod page;

pub use page::{
    Element, Page, Region, RegionKind, SharedPage, UiAction, CAROUSEL_TRACK, CHART_CANVAS,
    DEFAULT_TICKERS, DETAIL_PANEL, TICKER_SELECT,
};
