//! # grocer-core
//!
//! The storefront engine for Grocer - THE LOGIC.
//!
//! This crate implements a small grocery storefront entirely in memory:
//! a fixed catalog, a cart, keyword search, bill computation and a mock
//! checkout flow with payment form validation.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Owns all storefront state through an explicit `Storefront` value
//! - Changes state only in response to dispatched actions
//! - Uses integer money (paise); no floating point anywhere
//! - Has NO async, NO network dependencies, NO clock (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod detail;
pub mod fixtures;
pub mod notify;
pub mod pricing;
pub mod primitives;
pub mod search;
pub mod storefront;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    CartLineItem, Category, CategoryId, Money, Product, ProductId, Rating, StoreError,
};

// =============================================================================
// RE-EXPORTS: Stores
// =============================================================================

pub use cart::{CartAction, CartState, CartStore, ZeroQuantityPolicy, reduce};
pub use catalog::{Catalog, CatalogProvider};
pub use notify::{SubscriptionId, Subscribers};
pub use search::{SearchState, SearchStore, search};

// =============================================================================
// RE-EXPORTS: Pricing and Checkout
// =============================================================================

pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutPhase, FormField, PaymentForm, PaymentMethod,
    ValidationError, ValidationErrors, validate,
};
pub use detail::{ProductDetail, Specification};
pub use pricing::{Bill, BillKind, PricingPolicy};
pub use storefront::{Storefront, StorefrontOptions};
