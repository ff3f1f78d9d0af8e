use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::error;

use crate::state::AppState;
use crate::ui::html::DashboardTemplate;
use crate::ui::Page;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/page", get(page_json))
        .route("/api/chart", get(chart_json))
}

fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {}", e)).into_response()
        }
    }
}

async fn index(State(state): State<AppState>) -> Response {
    let chart = state.dashboard.chart().snapshot();
    let template = DashboardTemplate::new(&state.dashboard.page().read(), chart.as_ref());
    render_template(&template)
}

async fn page_json(State(state): State<AppState>) -> Json<Page> {
    Json(state.dashboard.page().read().clone())
}

async fn chart_json(State(state): State<AppState>) -> Response {
    match state.dashboard.chart().snapshot() {
        Some(chart) => Json(chart).into_response(),
        None => (StatusCode::NOT_FOUND, "Chart not initialized").into_response(),
    }
}
