//! Startup error types
//!
//! Per-request handling has no error surface (unmatched paths serve the
//! fallback document), so only startup can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that terminate the process before the listener accepts connections.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error(
        "could not find the asset directory: {}, make sure to build the client first",
        .0.display()
    )]
    MissingAssetDir(PathBuf),

    #[error("asset directory {} is not accessible: {source}", .path.display())]
    AssetDirInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid listen address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("failed to initialize logger: {0}")]
    Logger(std::io::Error),

    #[error("failed to build async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to bind listener: {0}")]
    Bind(std::io::Error),
}
