//! # Catalog Module
//!
//! The read-only product catalog consumed by every other component.
//!
//! - Ordered list of categories and products (catalog order is stable)
//! - Lookup by product id and by category id
//! - Consistency checked once, at construction
//!
//! Uses `BTreeMap` indexes so that iteration over ids is deterministic.

use crate::{Category, CategoryId, Product, ProductId, StoreError, fixtures};
use std::collections::BTreeMap;

// =============================================================================
// CATALOG PROVIDER TRAIT
// =============================================================================

/// Read access to a catalog of categories and products.
///
/// All listings preserve catalog order. Implementations are expected to be
/// available synchronously and never change after construction.
pub trait CatalogProvider {
    /// All categories, in display order.
    fn categories(&self) -> &[Category];

    /// All products, in catalog order.
    fn products(&self) -> &[Product];

    /// Lookup a category by id.
    fn category(&self, id: &CategoryId) -> Option<&Category>;

    /// Lookup a product by id.
    fn product(&self, id: &ProductId) -> Option<&Product>;

    /// Products whose category key equals `id`, in catalog order.
    ///
    /// Returns `StoreError::CategoryNotFound` for an unknown category.
    fn products_in_category(&self, id: &CategoryId) -> Result<Vec<&Product>, StoreError> {
        if self.category(id).is_none() {
            return Err(StoreError::CategoryNotFound(id.clone()));
        }
        Ok(self
            .products()
            .iter()
            .filter(|p| &p.category == id)
            .collect())
    }

    /// Featured products, in catalog order.
    fn featured(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.featured).collect()
    }
}

// =============================================================================
// IN-MEMORY CATALOG
// =============================================================================

/// In-memory catalog built from a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    category_index: BTreeMap<CategoryId, usize>,
    product_index: BTreeMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and that every product
    /// points at a known category.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, StoreError> {
        let mut category_index = BTreeMap::new();
        for (pos, category) in categories.iter().enumerate() {
            if category_index.insert(category.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut product_index = BTreeMap::new();
        for (pos, product) in products.iter().enumerate() {
            if !category_index.contains_key(&product.category) {
                return Err(StoreError::UnknownCategory {
                    product: product.id.clone(),
                    category: product.category.clone(),
                });
            }
            if product_index.insert(product.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self {
            categories,
            products,
            category_index,
            product_index,
        })
    }

    /// The hard-coded storefront catalog.
    ///
    /// The fixtures are consistent by construction; should that ever break,
    /// an empty catalog is returned rather than panicking. The
    /// `fixtures_build_cleanly` test is what catches such a break.
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new(fixtures::categories(), fixtures::products()).unwrap_or_default()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn products(&self) -> &[Product] {
        &self.products
    }

    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.category_index
            .get(id)
            .and_then(|&pos| self.categories.get(pos))
    }

    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.product_index
            .get(id)
            .and_then(|&pos| self.products.get(pos))
    }
}

// =============================================================================
// TESTS
// =============================================================================
