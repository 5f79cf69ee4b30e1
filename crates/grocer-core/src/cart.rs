//! # Cart Module
//!
//! The single authoritative shopping cart for the active session.
//!
//! - State is an ordered list of line items (first-added order)
//! - Changes are expressed as `CartAction`s applied by the pure `reduce`
//! - The item count is derived from the lines on every read, so it can
//!   never drift from the sum of quantities
//!
//! `CartStore` wraps the state with a subscriber registry and notifies
//! listeners after every dispatch.

use crate::notify::{SubscriptionId, Subscribers};
use crate::{CartLineItem, Money, ProductId};
use serde::{Deserialize, Serialize};

// =============================================================================
// POLICY
// =============================================================================

/// What happens to a line whose quantity is updated to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroQuantityPolicy {
    /// Keep the row listed with quantity 0 until it is removed explicitly.
    #[default]
    Retain,
    /// Drop the row as soon as its quantity reaches 0.
    Remove,
}

// =============================================================================
// STATE
// =============================================================================

/// Cart contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in first-added order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Lookup a line by product id.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if a product has a line in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Check if the cart has no lines.
    ///
    /// A cart holding only zero-quantity rows is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::total).sum()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }
}

// =============================================================================
// ACTIONS & REDUCER
// =============================================================================

/// A change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit. The incoming `quantity` field is ignored.
    Add(CartLineItem),
    /// Delete the line with this id, if present.
    Remove(ProductId),
    /// Set the quantity of an existing line.
    UpdateQuantity { id: ProductId, quantity: u32 },
    /// Empty the cart.
    Clear,
}

/// Apply an action to a cart state, producing the next state.
///
/// Never fails. Actions on ids that are not in the cart leave it unchanged
/// (except `Add`, which creates the line).
#[must_use]
pub fn reduce(mut state: CartState, action: &CartAction, policy: ZeroQuantityPolicy) -> CartState {
    match action {
        CartAction::Add(item) => {
            if let Some(line) = state.line_mut(&item.id) {
                line.quantity = line.quantity.saturating_add(1);
            } else {
                state.items.push(CartLineItem {
                    quantity: 1,
                    ..item.clone()
                });
            }
        }
        CartAction::Remove(id) => {
            state.items.retain(|i| &i.id != id);
        }
        CartAction::UpdateQuantity { id, quantity } => {
            if let Some(line) = state.line_mut(id) {
                line.quantity = *quantity;
            }
            if *quantity == 0 && policy == ZeroQuantityPolicy::Remove {
                state.items.retain(|i| &i.id != id);
            }
        }
        CartAction::Clear => state.items.clear(),
    }
    state
}

// =============================================================================
// STORE
// =============================================================================

/// Cart state plus change notification.
#[derive(Debug, Default)]
pub struct CartStore {
    state: CartState,
    policy: ZeroQuantityPolicy,
    subscribers: Subscribers<CartState>,
}

impl CartStore {
    /// Create an empty cart store with the default zero-quantity policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart store with an explicit zero-quantity policy.
    #[must_use]
    pub fn with_policy(policy: ZeroQuantityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The zero-quantity policy in effect.
    #[must_use]
    pub fn policy(&self) -> ZeroQuantityPolicy {
        self.policy
    }

    /// Apply an action and notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, &action, self.policy);
        self.subscribers.notify(&self.state);
        &self.state
    }

    /// Add one unit of `item`.
    pub fn add_item(&mut self, item: CartLineItem) -> &CartState {
        self.dispatch(CartAction::Add(item))
    }

    /// Remove the line for `id`.
    pub fn remove_item(&mut self, id: &ProductId) -> &CartState {
        self.dispatch(CartAction::Remove(id.clone()))
    }

    /// Set the quantity of the line for `id`.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> &CartState {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartAction::Clear)
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
