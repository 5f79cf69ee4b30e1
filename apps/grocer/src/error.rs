//! # Application Errors
//!
//! Top-level error type for CLI commands and server startup.

use crate::config::ConfigError;
use grocer_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrocerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Bind failed on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}
