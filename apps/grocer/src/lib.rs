//! # grocer
//!
//! Library half of the Grocer binary, exposed for integration tests.
//!
//! - `api` - axum HTTP API over a shared `Storefront`
//! - `cli` - clap command definitions and implementations
//! - `config` - TOML configuration with environment overrides
//! - `payment` - the simulated payment timer

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod payment;

pub use config::{Config, ConfigError};
pub use error::GrocerError;
