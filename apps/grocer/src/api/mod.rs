//! # Grocer HTTP API Module
//!
//! This module implements the HTTP JSON API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /categories` - List categories
//! - `GET /categories/{id}/products` - Products in a category
//! - `GET /products` - Full catalog (`?featured=true` for featured only)
//! - `GET /products/{id}` - Product page view
//! - `GET /search?q=` - Search the catalog
//! - `GET /cart` - Cart with drawer bill
//! - `POST /cart/items` - Add a product
//! - `PUT /cart/items/{id}` - Set a line quantity
//! - `DELETE /cart/items/{id}` - Remove a line
//! - `GET /checkout` - Checkout phase with payment bill
//! - `POST /checkout/start` - Begin checkout
//! - `POST /checkout/submit` - Submit the payment form
//! - `POST /checkout/confirm` - Confirm payment and start the timer
//! - `POST /checkout/cancel` - Back out of confirmation

mod handlers;
mod middleware;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    AddItemRequest, ApiError, CartResponse, CategoriesResponse, CheckoutResponse, ErrorResponse,
    FieldError, HealthResponse, ProductsResponse, SubmitRequest, UpdateQuantityRequest,
};

use crate::config::{CheckoutConfig, Config, ServerConfig};
use crate::error::GrocerError;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use grocer_core::Storefront;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the storefront and the checkout timings.
#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<RwLock<Storefront>>,
    pub checkout: CheckoutConfig,
}

impl AppState {
    /// Create new app state around a storefront.
    #[must_use]
    pub fn new(storefront: Storefront, checkout: CheckoutConfig) -> Self {
        Self {
            storefront: Arc::new(RwLock::new(storefront)),
            checkout,
        }
    }

    /// Build state from a full configuration, over the fixture catalog.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Storefront::with_fixtures(config.storefront_options()),
            config.checkout,
        )
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer from `server.cors_origins`.
///
/// - `["*"]`: any origin
/// - empty: localhost only
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - if enabled
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/categories", get(handlers::categories_handler))
        .route(
            "/categories/{id}/products",
            get(handlers::category_products_handler),
        )
        .route("/products", get(handlers::products_handler))
        .route("/products/{id}", get(handlers::product_handler))
        .route("/search", get(handlers::search_handler))
        .route("/cart", get(handlers::cart_handler))
        .route("/cart/items", post(handlers::add_item_handler))
        .route(
            "/cart/items/{id}",
            put(handlers::update_item_handler).delete(handlers::remove_item_handler),
        )
        .route("/checkout", get(handlers::checkout_handler))
        .route("/checkout/start", post(handlers::start_checkout_handler))
        .route("/checkout/submit", post(handlers::submit_handler))
        .route("/checkout/confirm", post(handlers::confirm_handler))
        .route("/checkout/cancel", post(handlers::cancel_handler));

    match create_rate_limiter(server.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", server.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&server.cors_origins))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &Config) -> Result<(), GrocerError> {
    let state = AppState::from_config(config);
    let router = create_router(state, &config.server);
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| GrocerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Grocer HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(GrocerError::Server)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
