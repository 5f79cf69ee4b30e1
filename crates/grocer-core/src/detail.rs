//! # Product Detail
//!
//! The view model behind the product page: the product itself plus the
//! defaults and derived figures the page shows around it.

use crate::primitives::{
    DEFAULT_DELIVERY_TIME, DEFAULT_DESCRIPTION, DEFAULT_RATING_TENTHS, DEFAULT_SHELF_LIFE,
    DEFAULT_STORAGE, FREE_DELIVERY_THRESHOLD,
};
use crate::{Money, Product, Rating};
use serde::{Deserialize, Serialize};

/// One row of the specifications table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

impl Specification {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Everything the product page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub rating: Rating,
    pub description: String,
    pub delivery_time: String,
    pub specifications: Vec<Specification>,
    /// Whole-percent discount off the original price, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u64>,
    pub free_delivery_above: Money,
}

impl ProductDetail {
    /// Build the detail view for a product, filling in page defaults.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let specifications = vec![
            Specification::new("Weight", product.weight.clone()),
            Specification::new("Shelf Life", DEFAULT_SHELF_LIFE),
            Specification::new("Storage", DEFAULT_STORAGE),
        ];

        Self {
            rating: product
                .rating
                .unwrap_or(Rating::from_tenths(DEFAULT_RATING_TENTHS)),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            delivery_time: DEFAULT_DELIVERY_TIME.to_string(),
            specifications,
            discount_percent: product
                .original_price
                .and_then(|original| discount_percent(original, product.price)),
            free_delivery_above: FREE_DELIVERY_THRESHOLD,
            product: product.clone(),
        }
    }
}

/// `round((original - price) / original × 100)`, half-up.
///
/// `None` when there is no discount to show.
fn discount_percent(original: Money, price: Money) -> Option<u64> {
    let original = original.paise();
    let price = price.paise();
    if original == 0 || price >= original {
        return None;
    }
    let off = original - price;
    Some((off.saturating_mul(200) + original) / original.saturating_mul(2))
}
