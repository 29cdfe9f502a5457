use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use catalog::DeveloperInfo;
use std::sync::Arc;

/// Identity of the API's developer, straight from configuration.
pub async fn developer_info(State(state): State<Arc<ServerState>>) -> Json<DeveloperInfo> {
    Json(state.config.developer.clone())
}
