//! # Core Type Definitions
//!
//! This module contains the core records of the Grocer storefront:
//! - Identifiers (`ProductId`, `CategoryId`)
//! - Amounts and scores (`Money`, `Rating`)
//! - Catalog records (`Product`, `Category`)
//! - Cart rows (`CartLineItem`)
//! - Error types (`StoreError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Represent money in paise (1/100 rupee)
//! - Use saturating arithmetic for sums to prevent overflow

use crate::checkout::CheckoutPhase;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a product within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create a new product id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a category, also used as the category key on products.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    /// Create a new category id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// MONEY
// =============================================================================

/// An amount of money in paise (1/100 rupee).
///
/// Catalog prices are whole rupees, but tax produces fractional rupees,
/// so every amount is carried in the minor unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create an amount from paise.
    #[must_use]
    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    /// Create an amount from whole rupees.
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees.saturating_mul(100))
    }

    /// Raw amount in paise.
    #[must_use]
    pub const fn paise(self) -> u64 {
        self.0
    }

    /// Whole-rupee part of the amount.
    #[must_use]
    pub const fn rupees(self) -> u64 {
        self.0 / 100
    }

    /// Add two amounts, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Percentage of this amount, rounded half-up to the paisa.
    #[must_use]
    pub const fn percent(self, percent: u32) -> Self {
        let scaled = self.0.saturating_mul(percent as u64).saturating_add(50);
        Self(scaled / 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// =============================================================================
// RATING
// =============================================================================

/// Customer rating in tenths of a star (`48` is 4.8 stars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(pub u8);

impl Rating {
    /// Create a rating from tenths of a star.
    #[must_use]
    pub const fn from_tenths(tenths: u8) -> Self {
        Self(tenths)
    }

    /// Raw value in tenths.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

// =============================================================================
// CATALOG RECORDS
// =============================================================================

/// A category shelf in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub image: String,
}

impl Category {
    /// Create a new category.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            title: title.into(),
            image: image.into(),
        }
    }
}

/// A product record. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Free-text unit label ("500g", "12 pcs", "Set of 5").
    pub weight: String,
    pub image: String,
    pub category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// List price before discount, if the product is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Shown in the featured section of the storefront.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a product with the required fields; optional fields start empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        weight: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            weight: weight.into(),
            image: image.into(),
            category: CategoryId::new(category),
            description: None,
            rating: None,
            original_price: None,
            featured: false,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the pre-discount list price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Mark the product as featured.
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

// =============================================================================
// CART LINE ITEM
// =============================================================================

/// One row of the cart, keyed by product id.
///
/// `name`, `price` and `image` are copied from the product when the row is
/// first added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// Line total (`price × quantity`).
    #[must_use]
    pub const fn total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

impl From<&Product> for CartLineItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by catalog construction, lookups and cart changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Two products share the same id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Two categories share the same id.
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    /// A product references a category that is not in the catalog.
    #[error("Product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryId,
    },

    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The cart is frozen while its payment is in flight or done.
    #[error("Cart cannot change while checkout is {0}")]
    CartLocked(CheckoutPhase),

    /// A line would exceed the per-line quantity limit.
    #[error("Quantity for {product} cannot exceed {max}")]
    QuantityLimit { product: ProductId, max: u32 },
}

// =============================================================================
// TESTS
// =============================================================================
