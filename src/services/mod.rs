pub mod chart_service;
pub mod dashboard;
pub mod detail_service;
pub mod news_service;
pub mod symbol_list_service;

pub use chart_service::{ChartController, ChartUpdate};
pub use dashboard::{Dashboard, PageLoadReport};
pub use detail_service::DetailResolver;
pub use news_service::NewsLoader;
pub use symbol_list_service::SymbolListLoader;
