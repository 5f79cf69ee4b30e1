//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler takes the storefront lock for the whole operation, so
//! requests are applied strictly one after another.

use super::{
    AppState,
    types::{
        AddItemRequest, ApiError, CartResponse, CategoriesResponse, CheckoutResponse, FieldError,
        HealthResponse, ProductsQuery, ProductsResponse, SearchQuery, SubmitRequest,
        UpdateQuantityRequest,
    },
};
use crate::payment;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use grocer_core::{
    BillKind, CatalogProvider, CategoryId, ProductDetail, ProductId, SearchState, Storefront,
    primitives::MAX_QUERY_LENGTH,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CATALOG HANDLERS
// =============================================================================

/// List categories.
pub async fn categories_handler(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let store = state.storefront.read().await;
    Json(CategoriesResponse {
        categories: store.catalog().categories().to_vec(),
    })
}

/// List products of one category.
pub async fn category_products_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductsResponse> {
    let store = state.storefront.read().await;
    let products = store
        .catalog()
        .products_in_category(&CategoryId::new(id))?
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ProductsResponse { products }))
}

/// List the catalog, or only featured products with `?featured=true`.
pub async fn products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductsResponse> {
    let store = state.storefront.read().await;
    let products = if query.featured {
        store.catalog().featured().into_iter().cloned().collect()
    } else {
        store.catalog().products().to_vec()
    };
    Json(ProductsResponse { products })
}

/// Product page view.
pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductDetail> {
    let store = state.storefront.read().await;
    Ok(Json(store.product_detail(&ProductId::new(id))?))
}

// =============================================================================
// SEARCH HANDLER
// =============================================================================

/// Set the search query and return the results.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchState> {
    if query.q.len() > MAX_QUERY_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Query length {} exceeds maximum {} bytes",
            query.q.len(),
            MAX_QUERY_LENGTH
        )));
    }
    let mut store = state.storefront.write().await;
    Ok(Json(store.set_query(&query.q).clone()))
}

// =============================================================================
// CART HANDLERS
// =============================================================================

fn cart_response(store: &Storefront) -> CartResponse {
    let cart = store.cart();
    CartResponse {
        items: cart.items().to_vec(),
        item_count: cart.item_count(),
        bill: store.bill(BillKind::Drawer),
    }
}

/// Current cart with the drawer bill.
pub async fn cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let store = state.storefront.read().await;
    Json(cart_response(&store))
}

/// Add one unit of a product. The cart is locked (409) once payment is
/// confirmed.
pub async fn add_item_handler(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<CartResponse> {
    let mut store = state.storefront.write().await;
    store.add_to_cart(&request.product_id)?;
    tracing::debug!("Added {} to cart", request.product_id);
    Ok(Json(cart_response(&store)))
}

/// Set the quantity of a line already in the cart.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> ApiResult<CartResponse> {
    let id = ProductId::new(id);
    let mut store = state.storefront.write().await;
    if !store.cart().contains(&id) {
        return Err(ApiError::NotFound(format!("Product {} is not in the cart", id)));
    }
    store.update_quantity(&id, request.quantity)?;
    Ok(Json(cart_response(&store)))
}

/// Remove a line. Removing an absent line is not an error.
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CartResponse> {
    let mut store = state.storefront.write().await;
    store.remove_from_cart(&ProductId::new(id))?;
    Ok(Json(cart_response(&store)))
}

// =============================================================================
// CHECKOUT HANDLERS
// =============================================================================

fn checkout_response(store: &Storefront) -> CheckoutResponse {
    let flow = store.checkout();
    CheckoutResponse {
        phase: flow.map(|f| f.phase()),
        method: flow.map(|f| f.method()),
        errors: flow
            .map(|f| FieldError::from_errors(f.errors()))
            .unwrap_or_default(),
        bill: store.bill(BillKind::Payment),
    }
}

/// Checkout phase and payment bill.
pub async fn checkout_handler(State(state): State<AppState>) -> Json<CheckoutResponse> {
    let store = state.storefront.read().await;
    Json(checkout_response(&store))
}

/// Begin checkout. Fails with 409 on an empty cart.
pub async fn start_checkout_handler(State(state): State<AppState>) -> ApiResult<CheckoutResponse> {
    let mut store = state.storefront.write().await;
    store.begin_checkout()?;
    Ok(Json(checkout_response(&store)))
}

/// Submit the payment form. Fails with 422 and per-field errors.
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<CheckoutResponse> {
    let mut store = state.storefront.write().await;
    let flow = store.checkout_mut()?;
    flow.select_method(request.method)?;
    flow.submit_form(request.form)?;
    Ok(Json(checkout_response(&store)))
}

/// Back out of confirmation.
pub async fn cancel_handler(State(state): State<AppState>) -> ApiResult<CheckoutResponse> {
    let mut store = state.storefront.write().await;
    store.checkout_mut()?.cancel_confirmation()?;
    Ok(Json(checkout_response(&store)))
}

/// Confirm payment. Responds with `processing` at once; the payment timer
/// moves the checkout on afterwards.
pub async fn confirm_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let response = {
        let mut store = state.storefront.write().await;
        store.checkout_mut()?.confirm()?;
        checkout_response(&store)
    };
    tokio::spawn(payment::run_payment_timer(
        state.storefront.clone(),
        state.checkout,
    ));
    Ok((StatusCode::ACCEPTED, Json(response)))
}
