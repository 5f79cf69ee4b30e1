//! Integration tests for the Grocer HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

use axum::http::StatusCode;
use axum_test::TestServer;
use grocer::api::{AppState, CartResponse, CheckoutResponse, ErrorResponse, HealthResponse, create_router};
use grocer::config::{Config, ServerConfig};
use grocer_core::{CheckoutPhase, FormField, Money, PaymentMethod};
use serde_json::{Value, json};
use std::time::Duration;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server over a fresh fixture storefront, rate limiting off.
fn create_test_server() -> TestServer {
    let config = Config {
        server: ServerConfig {
            rate_limit: 0,
            ..ServerConfig::default()
        },
        ..Config::default()
    };
    let state = AppState::from_config(&config);
    TestServer::new(create_router(state, &config.server)).expect("test server")
}

fn ids(products: &Value) -> Vec<String> {
    products
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_str().expect("id").to_string())
        .collect()
}

fn delivery_form() -> Value {
    json!({
        "name": "Kiran Shah",
        "email": "kiran@example.com",
        "phone": "9000012345",
        "address": "21 Marine Drive",
        "city": "Mumbai",
        "state": "Maharashtra",
        "pincode": "400020"
    })
}

/// Add product "1" and move the checkout to confirmation.
async fn checkout_to_confirming(server: &TestServer) {
    server
        .post("/cart/items")
        .json(&json!({ "product_id": "1" }))
        .await
        .assert_status_ok();
    server.post("/checkout/start").await.assert_status_ok();
    let response = server
        .post("/checkout/submit")
        .json(&json!({ "method": "upi", "form": delivery_form() }))
        .await;
    response.assert_status_ok();
    let checkout: CheckoutResponse = response.json();
    assert_eq!(checkout.phase, Some(CheckoutPhase::Confirming));
    assert_eq!(checkout.method, Some(PaymentMethod::Upi));
}

async fn phase(server: &TestServer) -> Option<CheckoutPhase> {
    server.get("/checkout").await.json::<CheckoutResponse>().phase
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// CATALOG ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_categories_listed_in_order() {
    let server = create_test_server();

    let body: Value = server.get("/categories").await.json();

    assert_eq!(
        ids(&body["categories"]),
        vec!["fruits-vegetables", "dairy-bread-eggs", "pharmacy", "pet-care"]
    );
}

#[tokio::test]
async fn test_category_products_include_featured() {
    let server = create_test_server();

    let body: Value = server.get("/categories/fruits-vegetables/products").await.json();

    assert_eq!(ids(&body["products"]), vec!["1", "fv1", "fv2", "fv3", "fv4"]);
}

#[tokio::test]
async fn test_unknown_category_404() {
    let server = create_test_server();

    let response = server.get("/categories/bakery/products").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert!(!error.success);
}

#[tokio::test]
async fn test_featured_products() {
    let server = create_test_server();

    let all: Value = server.get("/products").await.json();
    let featured: Value = server.get("/products").add_query_param("featured", "true").await.json();

    assert_eq!(all["products"].as_array().expect("array").len(), 20);
    assert_eq!(ids(&featured["products"]), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_product_detail() {
    let server = create_test_server();

    let response = server.get("/products/pet1").await;

    response.assert_status_ok();
    let detail: Value = response.json();
    assert_eq!(detail["product"]["name"], "Premium Dog Food");
    assert_eq!(detail["rating"], 48);
    assert_eq!(detail["delivery_time"], "14 minutes");
    assert_eq!(detail["free_delivery_above"], 149_900);
}

#[tokio::test]
async fn test_product_detail_unknown_404() {
    let server = create_test_server();

    server.get("/products/zz9").await.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// SEARCH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_search_case_insensitive() {
    let server = create_test_server();

    let upper: Value = server.get("/search").add_query_param("q", "MILK").await.json();
    let lower: Value = server.get("/search").add_query_param("q", "milk").await.json();

    assert_eq!(upper["query"], "MILK");
    assert_eq!(ids(&upper["results"]), vec!["2"]);
    assert_eq!(upper["results"], lower["results"]);
}

#[tokio::test]
async fn test_search_empty_returns_catalog() {
    let server = create_test_server();

    let body: Value = server.get("/search").await.json();

    assert_eq!(body["results"].as_array().expect("array").len(), 20);
}

#[tokio::test]
async fn test_search_query_too_long() {
    let server = create_test_server();

    let response = server
        .get("/search")
        .add_query_param("q", "a".repeat(257))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// CART ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_add_same_product_twice() {
    let server = create_test_server();

    for _ in 0..2 {
        server
            .post("/cart/items")
            .json(&json!({ "product_id": "1" }))
            .await
            .assert_status_ok();
    }
    let cart: CartResponse = server.get("/cart").await.json();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(cart.item_count, 2);
    assert_eq!(cart.bill.subtotal, Money::from_rupees(80));
    assert_eq!(cart.bill.total, Money::from_rupees(110));
}

#[tokio::test]
async fn test_add_unknown_product_404() {
    let server = create_test_server();

    let response = server
        .post("/cart/items")
        .json(&json!({ "product_id": "nope" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let cart: CartResponse = server.get("/cart").await.json();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn test_update_quantity() {
    let server = create_test_server();
    server
        .post("/cart/items")
        .json(&json!({ "product_id": "db3" }))
        .await
        .assert_status_ok();

    let response = server
        .put("/cart/items/db3")
        .json(&json!({ "quantity": 5 }))
        .await;

    response.assert_status_ok();
    let cart: CartResponse = response.json();
    assert_eq!(cart.item_count, 5);
    assert_eq!(cart.bill.subtotal, Money::from_rupees(475));
}

#[tokio::test]
async fn test_update_to_zero_keeps_line() {
    let server = create_test_server();
    server
        .post("/cart/items")
        .json(&json!({ "product_id": "db3" }))
        .await
        .assert_status_ok();

    let cart: CartResponse = server
        .put("/cart/items/db3")
        .json(&json!({ "quantity": 0 }))
        .await
        .json();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.item_count, 0);
}

#[tokio::test]
async fn test_update_rejects_missing_line_and_huge_quantity() {
    let server = create_test_server();

    server
        .put("/cart/items/fv1")
        .json(&json!({ "quantity": 2 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .post("/cart/items")
        .json(&json!({ "product_id": "fv1" }))
        .await
        .assert_status_ok();
    server
        .put("/cart/items/fv1")
        .json(&json!({ "quantity": 1000 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_rejected_at_line_limit() {
    let server = create_test_server();
    server
        .post("/cart/items")
        .json(&json!({ "product_id": "fv2" }))
        .await
        .assert_status_ok();
    server
        .put("/cart/items/fv2")
        .json(&json!({ "quantity": 999 }))
        .await
        .assert_status_ok();

    let response = server
        .post("/cart/items")
        .json(&json!({ "product_id": "fv2" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Quantity for fv2 cannot exceed 999");
    let cart: CartResponse = server.get("/cart").await.json();
    assert_eq!(cart.item_count, 999);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let server = create_test_server();
    for id in ["1", "2", "2"] {
        server
            .post("/cart/items")
            .json(&json!({ "product_id": id }))
            .await
            .assert_status_ok();
    }

    let first: CartResponse = server.delete("/cart/items/2").await.json();
    let second: CartResponse = server.delete("/cart/items/2").await.json();

    assert_eq!(first.item_count, 1);
    assert_eq!(second.item_count, 1);
    assert_eq!(first.items, second.items);
}

// =============================================================================
// CHECKOUT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_conflict() {
    let server = create_test_server();

    let response = server.post("/checkout/start").await;

    response.assert_status(StatusCode::CONFLICT);
    let error: ErrorResponse = response.json();
    assert_eq!(
        error.error,
        "Please add items to your cart before proceeding to payment"
    );
}

#[tokio::test]
async fn test_checkout_shows_payment_bill() {
    let server = create_test_server();
    for _ in 0..2 {
        server
            .post("/cart/items")
            .json(&json!({ "product_id": "1" }))
            .await
            .assert_status_ok();
    }

    let checkout: CheckoutResponse = server.post("/checkout/start").await.json();

    assert_eq!(checkout.phase, Some(CheckoutPhase::Editing));
    assert_eq!(checkout.bill.tax, Money::from_paise(1440));
    assert_eq!(checkout.bill.total, Money::from_paise(12_440));
}

#[tokio::test]
async fn test_submit_invalid_card_number() {
    let server = create_test_server();
    server
        .post("/cart/items")
        .json(&json!({ "product_id": "3" }))
        .await
        .assert_status_ok();
    server.post("/checkout/start").await.assert_status_ok();

    let mut form = delivery_form();
    form["card_number"] = json!("123");
    form["expiry_date"] = json!("10/29");
    form["cvv"] = json!("456");
    let response = server
        .post("/checkout/submit")
        .json(&json!({ "method": "card", "form": form }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = response.json();
    assert_eq!(error.fields.len(), 1);
    assert_eq!(error.fields[0].field, FormField::CardNumber);
    assert_eq!(error.fields[0].message, "Invalid card number");

    let checkout: CheckoutResponse = server.get("/checkout").await.json();
    assert_eq!(checkout.phase, Some(CheckoutPhase::Editing));
    assert_eq!(checkout.errors.len(), 1);
}

#[tokio::test]
async fn test_submit_without_checkout_conflict() {
    let server = create_test_server();

    server
        .post("/checkout/submit")
        .json(&json!({ "method": "upi", "form": delivery_form() }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_returns_to_editing() {
    let server = create_test_server();
    checkout_to_confirming(&server).await;

    let checkout: CheckoutResponse = server.post("/checkout/cancel").await.json();

    assert_eq!(checkout.phase, Some(CheckoutPhase::Editing));
    server
        .post("/checkout/confirm")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn test_confirm_runs_payment_timer() {
    let server = create_test_server();
    checkout_to_confirming(&server).await;

    let response = server.post("/checkout/confirm").await;
    response.assert_status(StatusCode::ACCEPTED);
    let checkout: CheckoutResponse = response.json();
    assert_eq!(checkout.phase, Some(CheckoutPhase::Processing));

    // Nothing moves before the processing delay has fully elapsed.
    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(phase(&server).await, Some(CheckoutPhase::Processing));
    server
        .post("/checkout/start")
        .await
        .assert_status(StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(phase(&server).await, Some(CheckoutPhase::Success));

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(phase(&server).await, None);
    let cart: CartResponse = server.get("/cart").await.json();
    assert!(cart.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cart_locked_while_payment_runs() {
    let server = create_test_server();
    checkout_to_confirming(&server).await;
    server
        .post("/checkout/confirm")
        .await
        .assert_status(StatusCode::ACCEPTED);

    let response = server
        .post("/cart/items")
        .json(&json!({ "product_id": "2" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "Cart cannot change while checkout is processing");
    server
        .delete("/cart/items/1")
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .put("/cart/items/1")
        .json(&json!({ "quantity": 3 }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let cart: CartResponse = server.get("/cart").await.json();
    assert_eq!(cart.item_count, 1);

    tokio::time::sleep(Duration::from_millis(4001)).await;
    assert_eq!(phase(&server).await, None);
    let cart: CartResponse = server
        .post("/cart/items")
        .json(&json!({ "product_id": "2" }))
        .await
        .json();
    assert_eq!(cart.item_count, 1);
    assert_eq!(cart.items[0].id.as_str(), "2");
}
