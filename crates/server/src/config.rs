use catalog::DeveloperInfo;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Key used when none is configured. Development only.
pub const DEV_API_KEY: &str = "dev-api-key";

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Shared secret expected in the `X-API-Key` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Create missing tables at startup
    #[serde(default)]
    pub create_schema: bool,

    /// Mount prefix stripped from every request path before routing, e.g. `/as1`
    #[serde(default)]
    pub base_path: String,

    /// Enable CORS
    #[serde(default)]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Identity served by `/api/developer`
    #[serde(default)]
    pub developer: DeveloperInfo,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            api_key: None,
            database_path: default_database_path(),
            create_schema: false,
            base_path: String::new(),
            enable_cors: false,
            log_level: default_log_level(),
            developer: DeveloperInfo::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `CHI_CATALOG_*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("CHI_CATALOG")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.api_key.as_deref().map_or(true, str::is_empty) {
            tracing::warn!("No API key configured, using development key '{DEV_API_KEY}'");
            config.api_key = Some(DEV_API_KEY.to_string());
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// The configured key, or the development key when unset.
    pub fn effective_api_key(&self) -> &str {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(DEV_API_KEY)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_database_path() -> PathBuf {
    PathBuf::from("chi2023.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}
