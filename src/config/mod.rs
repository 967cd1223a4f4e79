// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        // The Environment source nests on '_', so SERVER_PORT would land on
        // a top-level `port` key and be ignored; the listen port is read
        // explicitly instead. SERVER_PORT wins over the bare PORT.
        let port = std::env::var("SERVER_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok();
        Self::load_with_port(config_path, port.as_deref())
    }

    /// Load with an explicit listen-port override, which wins over file
    /// and defaults
    fn load_with_port(
        config_path: &str,
        port_override: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER").separator("_"));

        if let Some(port) = port_override {
            let port: u16 = port.parse().map_err(|e| {
                config::ConfigError::Message(format!("invalid port override value: {e}"))
            })?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        let settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("assets.dir", "client/dist")?
            .set_default("assets.index_file", "index.html")?
            .set_default("assets.api_prefix", "/api")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "spaserve/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| StartupError::InvalidAddress {
            addr,
            reason: format!("{e}"),
        })
    }

    /// Resolve and verify the asset directory before the listener binds.
    ///
    /// Fails fast when the directory is missing: this is a build-order
    /// error on the operator side, not a transient fault, so it is never
    /// retried.
    pub fn resolve_asset_root(&self) -> Result<PathBuf, StartupError> {
        let dir = PathBuf::from(&self.assets.dir);
        if !dir.is_dir() {
            return Err(StartupError::MissingAssetDir(dir));
        }
        dir.canonicalize()
            .map_err(|source| StartupError::AssetDirInaccessible { path: dir, source })
    }
}
