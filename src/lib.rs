//! Data access and entity services for the CHI 2023 content catalog.
//!
//! This crate owns everything below the HTTP surface: opening SQLite
//! connections, validating request parameters, building parameterized
//! statements and mapping rows back into serializable records. The
//! `chi-catalog-server` crate exposes these services over HTTP.
//!
//! # Services
//!
//! | Service | Tables | Operations |
//! |---------|--------|------------|
//! | [`AuthorService`] | `author`, `content_has_author` | list |
//! | [`ContentService`] | `content`, `type`, `award`, both associations | list |
//! | [`AwardService`] | `award` | list, create, update, delete |
//! | [`AwardAssignmentService`] | `content_has_award` | assign, remove |
//!
//! Every service is constructed per request with `connect(&Database)` and
//! owns its connection for the lifetime of that request. All operations
//! block; callers on an async runtime should run them on a blocking pool.
//!
//! # Example
//!
//! ```
//! use catalog::{AwardService, Database};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let db = Database::new(dir.path().join("catalog.sqlite"));
//! db.ensure_schema().unwrap();
//!
//! let mut awards = AwardService::connect(&db).unwrap();
//! let id = awards.create("Best Paper").unwrap();
//! assert_eq!(id, 1);
//! assert_eq!(awards.list().unwrap()[0].name, "Best Paper");
//! ```

pub mod assignment;
pub mod author;
pub mod award;
pub mod content;
pub mod db;
pub mod developer;
pub mod error;
pub mod params;
mod query;
pub mod sanitize;

pub use assignment::{AwardAssignment, AwardAssignmentService};
pub use author::{Author, AuthorFilter, AuthorService};
pub use award::{Award, AwardRename, AwardService, NewAward};
pub use content::{Content, ContentFilter, ContentService};
pub use db::{Database, SCHEMA};
pub use developer::DeveloperInfo;
pub use error::{CatalogError, CatalogResult, StoreError};
pub use params::PAGE_SIZE;
