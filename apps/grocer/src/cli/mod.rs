//! # Grocer CLI Module
//!
//! This module implements the CLI interface for Grocer.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `categories` - List categories
//! - `products` - List products, optionally by category or featured only
//! - `product` - Show a product page
//! - `search` - Search the catalog
//! - `bill` - Price a cart of product ids
//! - `config` - Print the effective configuration

mod commands;

use crate::config::Config;
use crate::error::GrocerError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Grocer - grocery storefront server
///
/// Browse the catalog, price a cart and run the storefront HTTP API.
#[derive(Parser, Debug)]
#[command(name = "grocer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List categories
    Categories,

    /// List products
    Products {
        /// Only products in this category
        #[arg(long)]
        category: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,
    },

    /// Show the product page for one product
    Product {
        /// Product id
        id: String,
    },

    /// Search products by name or category
    Search {
        /// Search text (case-insensitive)
        query: String,
    },

    /// Price a cart built from product ids (repeat an id for quantity)
    Bill {
        /// Product ids to add, in order
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), GrocerError> {
    let mut config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Categories) => cmd_categories(&config, json_mode),
        Some(Commands::Products { category, featured }) => {
            cmd_products(&config, json_mode, category.as_deref(), featured)
        }
        Some(Commands::Product { id }) => cmd_product(&config, json_mode, &id),
        Some(Commands::Search { query }) => cmd_search(&config, json_mode, &query),
        Some(Commands::Bill { ids }) => cmd_bill(&config, json_mode, &ids),
        Some(Commands::Config) => cmd_config(&config, json_mode),
        None => {
            // No subcommand - list categories by default
            cmd_categories(&config, json_mode)
        }
    }
}
