use crate::error::ServerResult;
use crate::extract::SanitizedQuery;
use crate::routes::run_blocking;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use catalog::{Content, ContentFilter, ContentService};
use std::sync::Arc;

/// List content
///
/// Query parameters: `content_id`, `author_id`, `search`, `page`. At most
/// one page of results is returned even when `page` is omitted.
pub async fn list_content(
    State(state): State<Arc<ServerState>>,
    SanitizedQuery(params): SanitizedQuery,
) -> ServerResult<Json<Vec<Content>>> {
    let filter = ContentFilter::from_params(&params)?;
    let database = state.database.clone();

    let content = run_blocking(move || ContentService::connect(&database)?.list(&filter)).await?;
    tracing::debug!(count = content.len(), "content listed");

    Ok(Json(content))
}
