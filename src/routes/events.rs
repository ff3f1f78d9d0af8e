use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::models::SymbolDetail;
use crate::state::AppState;
use crate::ui::UiAction;

#[derive(Debug, Deserialize)]
pub struct SelectTicker {
    pub ticker: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/selector", post(change_selector))
        .route("/regions/:region_id/items/:index/click", post(click_item))
}

/// POST /api/selector
///
/// Same as changing the ticker dropdown: the chart update runs in the
/// background and supersedes any update still in flight.
async fn change_selector(
    State(state): State<AppState>,
    Json(body): Json<SelectTicker>,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    let ticker = body.ticker.trim();
    if ticker.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "ticker must not be empty"));
    }
    info!(ticker, "POST /api/selector");
    state.dashboard.on_selector_change(ticker);
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/regions/:region_id/items/:index/click
///
/// Resolves the clicked symbol and returns what the detail panel now shows.
async fn click_item(
    Path((region_id, index)): Path<(String, usize)>,
    State(state): State<AppState>,
) -> Result<Json<SymbolDetail>, Response> {
    info!(region_id = %region_id, index, "POST click");

    let Some(UiAction::ResolveDetail(symbol)) = state.dashboard.click_action(&region_id, index) else {
        return Err((StatusCode::NOT_FOUND, "No clickable item at that position").into_response());
    };

    state
        .dashboard
        .details()
        .try_resolve(&symbol)
        .await
        .map(Json)
        .map_err(|e| {
            error!(symbol = %symbol, kind = e.kind(), "Error fetching details for {}: {}", symbol, e);
            e.into_response()
        })
}
