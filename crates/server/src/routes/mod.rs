//! API route handlers
//!
//! The route table is fixed and built once at startup:
//!
//! - `health`: `/`
//! - `developer`: `/api/developer`
//! - `author`: `/api/author`
//! - `content`: `/api/content`
//! - `award`: `/api/award`
//! - `manage_awards`: `/api/manage_awards`

pub mod author;
pub mod award;
pub mod content;
pub mod developer;
pub mod health;
pub mod manage_awards;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::routing::{any, get, post};
use axum::Router;
use catalog::CatalogResult;
use std::sync::Arc;

/// Every route the API serves, keyed on the normalized path.
pub fn route_table() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", any(health::hello))
        .route("/api/developer", get(developer::developer_info))
        .route("/api/author", get(author::list_authors))
        .route("/api/content", get(content::list_content))
        .route(
            "/api/award",
            get(award::list_awards)
                .post(award::create_award)
                .patch(award::update_award)
                .delete(award::delete_award),
        )
        .route(
            "/api/manage_awards",
            post(manage_awards::assign_award).delete(manage_awards::remove_award),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// 405 for a known path hit with a method it does not serve
pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Run a catalog call on the blocking pool.
///
/// Each call opens its own SQLite connection, so nothing is shared across
/// requests apart from the database path.
pub(crate) async fn run_blocking<T, F>(work: F) -> ServerResult<T>
where
    F: FnOnce() -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}
