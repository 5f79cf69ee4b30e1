//! # Pricing Module
//!
//! Bill computation for the cart drawer and the payment summary.
//!
//! Both bills come from the same formula:
//!
//! ```text
//! total = subtotal + delivery + handling (+ tax on the payment summary)
//! ```
//!
//! The cart drawer shows an estimate without tax; GST is only added on the
//! payment summary. `BillKind` makes that split explicit.

use crate::cart::CartState;
use crate::primitives::{DELIVERY_CHARGE, HANDLING_CHARGE, TAX_PERCENT};
use crate::Money;
use serde::{Deserialize, Serialize};

/// Which summary a bill is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillKind {
    /// Cart drawer: charges, no tax.
    Drawer,
    /// Payment page: charges and tax.
    Payment,
}

/// Charges and tax rate applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub delivery_charge: Money,
    pub handling_charge: Money,
    pub tax_percent: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_charge: DELIVERY_CHARGE,
            handling_charge: HANDLING_CHARGE,
            tax_percent: TAX_PERCENT,
        }
    }
}

/// An itemized bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub kind: BillKind,
    pub subtotal: Money,
    pub delivery_charge: Money,
    pub handling_charge: Money,
    /// Zero on the drawer bill.
    pub tax: Money,
    pub total: Money,
}

impl PricingPolicy {
    /// Bill a cart.
    #[must_use]
    pub fn bill(&self, kind: BillKind, cart: &CartState) -> Bill {
        self.bill_subtotal(kind, cart.subtotal())
    }

    /// Bill an already-computed subtotal.
    #[must_use]
    pub fn bill_subtotal(&self, kind: BillKind, subtotal: Money) -> Bill {
        let tax = match kind {
            BillKind::Drawer => Money::ZERO,
            BillKind::Payment => subtotal.percent(self.tax_percent),
        };
        let total = subtotal
            .saturating_add(self.delivery_charge)
            .saturating_add(self.handling_charge)
            .saturating_add(tax);

        Bill {
            kind,
            subtotal,
            delivery_charge: self.delivery_charge,
            handling_charge: self.handling_charge,
            tax,
            total,
        }
    }
}
