//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use grocer_core::{
    Bill, CartLineItem, Category, CheckoutError, CheckoutPhase, FormField, PaymentForm,
    PaymentMethod, Product, ProductId, StoreError, ValidationErrors,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Category listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// Product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// `GET /products` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub featured: bool,
}

/// `GET /search` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// CART
// =============================================================================

/// Add-to-cart request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Quantity update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Cart contents with the drawer bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub item_count: u64,
    pub bill: Bill,
}

// =============================================================================
// CHECKOUT
// =============================================================================

/// Payment form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub method: PaymentMethod,
    pub form: PaymentForm,
}

/// Checkout status with the payment bill.
///
/// `phase` is `null` when no checkout is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub phase: Option<CheckoutPhase>,
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    pub bill: Bill,
}

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn from_errors(errors: &ValidationErrors) -> Vec<Self> {
        errors
            .iter()
            .map(|e| Self {
                field: e.field(),
                message: e.to_string(),
            })
            .collect()
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// Handler error, mapped to a status code and an `ErrorResponse`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(ValidationErrors),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ProductNotFound(_) | StoreError::CategoryNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            StoreError::CartLocked(_) => Self::Conflict(e.to_string()),
            StoreError::QuantityLimit { .. } => Self::BadRequest(e.to_string()),
            _ => Self::Internal(e.to_string()),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::Validation(errors) => Self::Unprocessable(errors),
            CheckoutError::EmptyCart
            | CheckoutError::NotStarted
            | CheckoutError::InvalidTransition { .. } => Self::Conflict(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, fields) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            Self::Unprocessable(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.to_string(),
                FieldError::from_errors(&errors),
            ),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new())
            }
        };
        let body = ErrorResponse {
            success: false,
            error,
            fields,
        };
        (status, Json(body)).into_response()
    }
}
