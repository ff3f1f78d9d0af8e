use std::sync::Arc;

use anyhow::Context;
use market_dashboard::app::create_app;
use market_dashboard::external::HttpTransport;
use market_dashboard::logging::{init_logging, LoggingConfig};
use market_dashboard::state::AppState;
use market_dashboard::ui::Page;
use market_dashboard::{Dashboard, DashboardConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("logging: {}", e))?;

    let config = DashboardConfig::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(
        api = %config.api_base_url,
        pricing = %config.pricing_api_url,
        "Dashboard configured"
    );

    let dashboard = Arc::new(Dashboard::new(
        &config,
        Arc::new(HttpTransport::new()),
        Page::standard(),
    ));

    // Page-load triggers run in the background; the host serves whatever
    // state the page is in.
    {
        let dashboard = dashboard.clone();
        tokio::spawn(async move {
            let report = dashboard.on_page_load().await;
            tracing::info!(?report, "Initial load finished");
        });
    }

    let app = create_app(AppState { dashboard });

    let listener = TcpListener::bind(config.host_addr)
        .await
        .with_context(|| format!("binding {}", config.host_addr))?;
    tracing::info!("Dashboard host running at http://{}/", config.host_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
