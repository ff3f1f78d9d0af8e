/// The headless host: page rendering, selector changes and item clicks.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use market_dashboard::app::create_app;
use market_dashboard::external::StubTransport;
use market_dashboard::models::TrendCategory;
use market_dashboard::state::AppState;
use market_dashboard::ui::Page;
use market_dashboard::{Dashboard, DashboardConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const API: &str = "http://backend.test/api";
const PRICING: &str = "http://pricing.test/price";

fn dashboard(stub: Arc<StubTransport>) -> Arc<Dashboard> {
    let config = DashboardConfig {
        api_base_url: API.to_string(),
        pricing_api_url: PRICING.to_string(),
        ..DashboardConfig::default()
    };
    Arc::new(Dashboard::new(&config, stub, Page::standard()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = create_app(AppState { dashboard: dashboard(Arc::new(StubTransport::new())) });
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_index_renders_escaped_symbols() {
    let stub = Arc::new(StubTransport::new());
    stub.respond_json(
        &format!("{}/homepage/trending/high", API),
        json!(["NVDA", "<b>X</b>"]),
    );
    let dashboard = dashboard(stub);
    dashboard.symbol_lists().load(TrendCategory::High).await;
    let app = create_app(AppState { dashboard });

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_string(response).await;

    assert!(html.contains("<li style=\"cursor: pointer\" data-symbol=\"NVDA\">NVDA</li>"));
    assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"));
    assert!(!html.contains("<b>X</b>"));
}

#[tokio::test]
async fn test_chart_is_not_found_until_initialized() {
    let app = create_app(AppState { dashboard: dashboard(Arc::new(StubTransport::new())) });
    let response = app
        .oneshot(Request::get("/api/chart").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_selector_post_updates_chart() {
    let stub = Arc::new(StubTransport::new());
    stub.respond_json(
        &format!("{}?ticker=AMZN", PRICING),
        json!({"price_data": {"open": [180.0], "close": [182.5], "timestamp": ["2024-06-10"]}}),
    );
    let dashboard = dashboard(stub);
    let app = create_app(AppState { dashboard: dashboard.clone() });

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/selector")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ticker":"AMZN"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    while dashboard.chart().snapshot().is_none() {
        tokio::task::yield_now().await;
    }

    let response = app
        .oneshot(Request::get("/api/chart").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let chart: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(chart["labels"], json!(["2024-06-10"]));
    assert_eq!(chart["options"]["x_title"], "Timestamp");
}

#[tokio::test]
async fn test_empty_ticker_is_rejected() {
    let app = create_app(AppState { dashboard: dashboard(Arc::new(StubTransport::new())) });
    let response = app
        .oneshot(
            Request::post("/api/selector")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ticker":"  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_click_route_resolves_detail() {
    let stub = Arc::new(StubTransport::new());
    stub.respond_json(&format!("{}/homepage/trending/low", API), json!(["INTC"]));
    stub.respond_json(
        &format!("{}/homepage/details/INTC", API),
        json!({"currentPrice": 30.4, "peRatio": null, "eps": -0.2, "marketCap": 1.3e11}),
    );
    let dashboard = dashboard(stub);
    dashboard.symbol_lists().load(TrendCategory::Low).await;
    let app = create_app(AppState { dashboard });

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/regions/low-list/items/0/click")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(detail["currentPrice"], json!(30.4));
    assert_eq!(detail["peRatio"], Value::Null);

    let response = app
        .oneshot(
            Request::post("/api/regions/low-list/items/3/click")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
