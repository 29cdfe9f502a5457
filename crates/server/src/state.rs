use crate::config::ServerConfig;
use crate::error::ServerResult;
use catalog::Database;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalog database. Services open their own connection per request.
    pub database: Database,
}

impl ServerState {
    /// Create new server state
    ///
    /// Runs the bootstrap schema when `create_schema` is set.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let database = Database::new(&config.database_path);
        if config.create_schema {
            database.ensure_schema()?;
        }

        Ok(Self {
            config: Arc::new(config),
            database,
        })
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &[u8]) -> bool {
        self.config
            .effective_api_key()
            .as_bytes()
            .ct_eq(key)
            .into()
    }
}
