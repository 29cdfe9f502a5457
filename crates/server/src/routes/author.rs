use crate::error::ServerResult;
use crate::extract::SanitizedQuery;
use crate::routes::run_blocking;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use catalog::{Author, AuthorFilter, AuthorService};
use std::sync::Arc;

/// List authors
///
/// Query parameters: `author_id`, `content_id`, `search`, `page`. Without
/// `page` every match is returned.
pub async fn list_authors(
    State(state): State<Arc<ServerState>>,
    SanitizedQuery(params): SanitizedQuery,
) -> ServerResult<Json<Vec<Author>>> {
    let filter = AuthorFilter::from_params(&params)?;
    let database = state.database.clone();

    let authors = run_blocking(move || AuthorService::connect(&database)?.list(&filter)).await?;
    tracing::debug!(count = authors.len(), "authors listed");

    Ok(Json(authors))
}
