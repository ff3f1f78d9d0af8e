mod chart;
mod detail;
mod news;
mod price_series;
mod trend;

pub use chart::{
    Chart, ChartData, ChartOptions, ChartSlot, ChartStatus, Dataset, CLOSE_PRICE_LABEL, MAX_X_TICKS,
    OPEN_PRICE_LABEL, X_AXIS_TITLE, Y_AXIS_TITLE,
};
pub use detail::SymbolDetail;
pub use news::NewsItem;
pub use price_series::{PriceSeries, PricingResponse, RawPriceData, TimestampLabel};
pub use trend::TrendCategory;
