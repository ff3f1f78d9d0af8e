use axum::Router;

use crate::routes::{events, health, page};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .merge(page::router())
        .nest("/api", events::router())
        .with_state(state)
}
