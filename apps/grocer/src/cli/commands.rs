//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::Config;
use crate::error::GrocerError;
use grocer_core::{Bill, BillKind, CatalogProvider, CategoryId, Product, ProductId, Storefront};
use serde::Serialize;

fn storefront(config: &Config) -> Storefront {
    Storefront::with_fixtures(config.storefront_options())
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn print_product_rows(products: &[&Product]) {
    for p in products {
        println!(
            "  {:<6} {:<26} {:>9}  {}",
            p.id.as_str(),
            p.name,
            p.price.to_string(),
            p.weight
        );
    }
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), GrocerError> {
    println!("Grocer Storefront Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:        {}", config.server.host);
    println!("  Port:        {}", config.server.port);
    println!("  Rate limit:  {}/s", config.server.rate_limit);
    println!("  Zero qty:    {:?}", config.cart.zero_quantity);
    println!();
    println!("Endpoints:");
    println!("  GET  /products     - Browse the catalog");
    println!("  GET  /search?q=    - Search products");
    println!("  GET  /cart         - Cart and drawer bill");
    println!("  POST /cart/items   - Add to cart");
    println!("  GET  /checkout     - Checkout status");
    println!("  GET  /health       - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// CATALOG COMMANDS
// =============================================================================

/// List categories.
pub fn cmd_categories(config: &Config, json_mode: bool) -> Result<(), GrocerError> {
    let store = storefront(config);
    let categories = store.catalog().categories();

    if json_mode {
        print_json(categories);
        return Ok(());
    }

    println!("Categories");
    println!("==========");
    for c in categories {
        println!("  {:<20} {}", c.id.as_str(), c.title);
    }
    Ok(())
}

/// List products.
pub fn cmd_products(
    config: &Config,
    json_mode: bool,
    category: Option<&str>,
    featured: bool,
) -> Result<(), GrocerError> {
    let store = storefront(config);
    let catalog = store.catalog();

    let mut products: Vec<&Product> = match category {
        Some(id) => catalog.products_in_category(&CategoryId::new(id))?,
        None => catalog.products().iter().collect(),
    };
    if featured {
        products.retain(|p| p.featured);
    }

    if json_mode {
        print_json(&products);
        return Ok(());
    }

    println!("Products ({})", products.len());
    println!("========");
    print_product_rows(&products);
    Ok(())
}

/// Show a product page.
pub fn cmd_product(config: &Config, json_mode: bool, id: &str) -> Result<(), GrocerError> {
    let store = storefront(config);
    let detail = store.product_detail(&ProductId::new(id))?;

    if json_mode {
        print_json(&detail);
        return Ok(());
    }

    let p = &detail.product;
    println!("{}", p.name);
    println!("{}", "=".repeat(p.name.chars().count()));
    println!("Price:     {}", p.price);
    if let (Some(original), Some(off)) = (p.original_price, detail.discount_percent) {
        println!("Was:       {} ({}% off)", original, off);
    }
    println!("Rating:    {}", detail.rating);
    println!("Delivery:  {}", detail.delivery_time);
    println!();
    println!("{}", detail.description);
    println!();
    println!("Specifications:");
    for spec in &detail.specifications {
        println!("  {:<12} {}", spec.label, spec.value);
    }
    println!();
    println!("Free delivery on orders above {}", detail.free_delivery_above);
    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Search the catalog.
pub fn cmd_search(config: &Config, json_mode: bool, query: &str) -> Result<(), GrocerError> {
    let mut store = storefront(config);
    let state = store.set_query(query);

    if json_mode {
        print_json(state);
        return Ok(());
    }

    println!("Results for {:?}: {}", state.query, state.results.len());
    let rows: Vec<&Product> = state.results.iter().collect();
    print_product_rows(&rows);
    Ok(())
}

// =============================================================================
// BILL COMMAND
// =============================================================================

/// Price a cart built from product ids.
pub fn cmd_bill(config: &Config, json_mode: bool, ids: &[String]) -> Result<(), GrocerError> {
    let mut store = storefront(config);
    for id in ids {
        store.add_to_cart(&ProductId::new(id.as_str()))?;
    }
    let drawer = store.bill(BillKind::Drawer);
    let payment = store.bill(BillKind::Payment);

    if json_mode {
        let output = serde_json::json!({
            "items": store.cart().items(),
            "item_count": store.cart().item_count(),
            "drawer": drawer,
            "payment": payment,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Cart ({} items)", store.cart().item_count());
    println!("====");
    for line in store.cart().items() {
        println!(
            "  {:<26} {:>3} x {:>9} = {:>10}",
            line.name,
            line.quantity,
            line.price.to_string(),
            line.total().to_string()
        );
    }
    println!();
    print_bill("Cart drawer", &drawer);
    println!();
    print_bill("Payment summary", &payment);
    Ok(())
}

fn print_bill(title: &str, bill: &Bill) {
    println!("{}", title);
    println!("  Subtotal:  {:>10}", bill.subtotal.to_string());
    println!("  Delivery:  {:>10}", bill.delivery_charge.to_string());
    println!("  Handling:  {:>10}", bill.handling_charge.to_string());
    if bill.kind == BillKind::Payment {
        println!("  GST:       {:>10}", bill.tax.to_string());
    }
    println!("  Total:     {:>10}", bill.total.to_string());
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_config(config: &Config, json_mode: bool) -> Result<(), GrocerError> {
    if json_mode {
        print_json(config);
        return Ok(());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
