//! # Storefront Primitives
//!
//! Hardcoded constants for the Grocer storefront.
//!
//! These values are compiled into the binary. The pricing and delay
//! constants are defaults: the application may override them from
//! configuration, everything else is fixed.

use crate::Money;

// =============================================================================
// PRICING
// =============================================================================

/// Flat delivery charge added to every bill (₹25).
pub const DELIVERY_CHARGE: Money = Money::from_rupees(25);

/// Flat handling charge added to every bill (₹5).
pub const HANDLING_CHARGE: Money = Money::from_rupees(5);

/// GST applied on the payment summary, in whole percent.
pub const TAX_PERCENT: u32 = 18;

/// Order value above which the product page advertises free delivery (₹1499).
///
/// Informational only; the bill always carries the delivery charge.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::from_rupees(1499);

// =============================================================================
// CHECKOUT TIMING
// =============================================================================

/// Simulated payment processing time in milliseconds.
pub const PAYMENT_PROCESSING_DELAY_MS: u64 = 2000;

/// Time the success screen stays up before redirecting, in milliseconds.
pub const REDIRECT_DELAY_MS: u64 = 2000;

// =============================================================================
// PAYMENT FORM FIELD LENGTHS
// =============================================================================

/// Card numbers are exactly 16 digits.
pub const CARD_NUMBER_DIGITS: usize = 16;

/// CVV codes are exactly 3 digits.
pub const CVV_DIGITS: usize = 3;

/// Phone numbers are exactly 10 digits.
pub const PHONE_DIGITS: usize = 10;

/// Pincodes are exactly 6 digits.
pub const PINCODE_DIGITS: usize = 6;

// =============================================================================
// PRODUCT DETAIL DEFAULTS
// =============================================================================

/// Rating shown for products without one (4.5 stars).
pub const DEFAULT_RATING_TENTHS: u8 = 45;

/// Delivery promise shown on the product page.
pub const DEFAULT_DELIVERY_TIME: &str = "14 minutes";

/// Shelf life shown in the product specifications.
pub const DEFAULT_SHELF_LIFE: &str = "2-3 days";

/// Storage advice shown in the product specifications.
pub const DEFAULT_STORAGE: &str = "Refrigerated";

/// Description shown for products without one.
pub const DEFAULT_DESCRIPTION: &str = "Fresh and juicy produce sourced directly from local farmers. \
Carefully selected and quality checked to ensure the best taste and nutritional value.";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a search query in bytes.
///
/// Longer queries are rejected at the API boundary.
pub const MAX_QUERY_LENGTH: usize = 256;

/// Maximum quantity accepted for a single line item.
pub const MAX_LINE_QUANTITY: u32 = 999;
