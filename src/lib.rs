//! Market dashboard pipeline: trending symbol lists, per-symbol detail
//! lookups, a news carousel and a single incrementally updated price chart,
//! rendered into a page of addressable UI regions.

pub mod app;
pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod ui;

pub use config::DashboardConfig;
pub use errors::DashboardError;
pub use services::Dashboard;
