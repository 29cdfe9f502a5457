//! CHI catalog server - HTTP REST API for the CHI 2023 papers catalog
//!
//! This crate exposes the [`catalog`] services over HTTP:
//!
//! - **Authors and content**: filtered, paginated listings
//! - **Awards**: create, rename and delete award names
//! - **Award assignment**: attach an award to a paper or detach it
//! - **Developer info**: static identity of the API's author
//!
//! # Features
//!
//! - **Authentication**: a single static API key in the `X-API-Key` header,
//!   checked before routing
//! - **Middleware**: path normalization, CORS, request ID tracking,
//!   structured logging, request timeout
//! - **Configuration**: environment variable and file-based configuration
//! - **Error Handling**: JSON `{"error": ...}` envelopes with fixed messages
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! Every endpoint requires the API key, including `/`.
//!
//! - `ANY /` - Hello message
//! - `GET /api/developer` - Developer identity
//! - `GET /api/author` - List authors (`author_id`, `content_id`, `search`, `page`)
//! - `GET /api/content` - List content (`content_id`, `author_id`, `search`, `page`)
//! - `GET|POST|PATCH|DELETE /api/award` - Award CRUD
//! - `POST|DELETE /api/manage_awards` - Assign or remove a paper's award
//!
//! Paths are matched case-insensitively, ignoring trailing slashes and the
//! configured `base_path` prefix.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_app, start_server};
pub use state::ServerState;
