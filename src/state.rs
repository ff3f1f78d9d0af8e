use std::sync::Arc;

use crate::services::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}
