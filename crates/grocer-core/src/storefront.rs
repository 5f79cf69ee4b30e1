//! # Storefront Module
//!
//! The top-level application instance: catalog, cart store, search store,
//! pricing and the current checkout, owned together and passed explicitly.
//!
//! There is no global state. Whoever owns a `Storefront` owns the session.
//! Cart and search never call into each other; the storefront only routes
//! operations to the right store.

use crate::cart::{CartState, CartStore, ZeroQuantityPolicy};
use crate::catalog::{Catalog, CatalogProvider};
use crate::checkout::{CheckoutError, CheckoutFlow, CheckoutPhase};
use crate::detail::ProductDetail;
use crate::pricing::{Bill, BillKind, PricingPolicy};
use crate::search::{SearchState, SearchStore};
use crate::primitives::MAX_LINE_QUANTITY;
use crate::{CartLineItem, ProductId, StoreError};

/// Tunables for a storefront instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorefrontOptions {
    pub pricing: PricingPolicy,
    pub zero_quantity: ZeroQuantityPolicy,
}

/// A storefront session.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    cart: CartStore,
    search: SearchStore,
    pricing: PricingPolicy,
    checkout: Option<CheckoutFlow>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(Catalog::fixtures(), StorefrontOptions::default())
    }
}

impl Storefront {
    /// Create a storefront over `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog, options: StorefrontOptions) -> Self {
        Self {
            catalog,
            cart: CartStore::with_policy(options.zero_quantity),
            search: SearchStore::new(),
            pricing: options.pricing,
            checkout: None,
        }
    }

    /// Create a storefront over the built-in fixtures.
    #[must_use]
    pub fn with_fixtures(options: StorefrontOptions) -> Self {
        Self::new(Catalog::fixtures(), options)
    }

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The pricing policy.
    #[must_use]
    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    // =========================================================================
    // CATALOG
    // =========================================================================

    /// Detail view for a product.
    pub fn product_detail(&self, id: &ProductId) -> Result<ProductDetail, StoreError> {
        self.catalog
            .product(id)
            .map(ProductDetail::from_product)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    // =========================================================================
    // CART
    // =========================================================================

    /// The cart store, for subscribing to changes.
    pub fn cart_store(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Current cart contents.
    #[must_use]
    pub fn cart(&self) -> &CartState {
        self.cart.state()
    }

    /// Add one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<&CartState, StoreError> {
        self.ensure_cart_open()?;
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;
        if let Some(line) = self.cart.state().line(id)
            && line.quantity >= MAX_LINE_QUANTITY
        {
            return Err(StoreError::QuantityLimit {
                product: id.clone(),
                max: MAX_LINE_QUANTITY,
            });
        }
        let item = CartLineItem::from(product);
        Ok(self.cart.add_item(item))
    }

    /// Remove a product's line from the cart.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<&CartState, StoreError> {
        self.ensure_cart_open()?;
        Ok(self.cart.remove_item(id))
    }

    /// Set the quantity of a product already in the cart.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: u32,
    ) -> Result<&CartState, StoreError> {
        self.ensure_cart_open()?;
        if quantity > MAX_LINE_QUANTITY {
            return Err(StoreError::QuantityLimit {
                product: id.clone(),
                max: MAX_LINE_QUANTITY,
            });
        }
        Ok(self.cart.update_quantity(id, quantity))
    }

    fn ensure_cart_open(&self) -> Result<(), StoreError> {
        match self.checkout.as_ref().map(CheckoutFlow::phase) {
            Some(phase) if phase.holds_cart() => Err(StoreError::CartLocked(phase)),
            _ => Ok(()),
        }
    }

    /// Bill for the current cart.
    #[must_use]
    pub fn bill(&self, kind: BillKind) -> Bill {
        self.pricing.bill(kind, self.cart.state())
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// The search store, for subscribing to changes.
    pub fn search_store(&mut self) -> &mut SearchStore {
        &mut self.search
    }

    /// Current search state.
    #[must_use]
    pub fn search(&self) -> &SearchState {
        self.search.state()
    }

    /// Run a search over the catalog.
    pub fn set_query(&mut self, query: &str) -> &SearchState {
        self.search.set_query(&self.catalog, query)
    }

    // =========================================================================
    // CHECKOUT
    // =========================================================================

    /// The checkout in progress, if any.
    #[must_use]
    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    /// Mutable access to the checkout in progress.
    pub fn checkout_mut(&mut self) -> Result<&mut CheckoutFlow, CheckoutError> {
        self.checkout.as_mut().ok_or(CheckoutError::NotStarted)
    }

    /// Start (or restart) checkout for the current cart.
    ///
    /// A checkout that is already processing payment is left alone.
    pub fn begin_checkout(&mut self) -> Result<&CheckoutFlow, CheckoutError> {
        if let Some(phase) = self.checkout.as_ref().map(CheckoutFlow::phase)
            && phase.holds_cart()
        {
            return Err(CheckoutError::InvalidTransition {
                from: phase,
                action: "restart checkout",
            });
        }
        let flow: &CheckoutFlow = self.checkout.insert(CheckoutFlow::begin(self.cart.state())?);
        Ok(flow)
    }

    /// Payment simulation finished.
    pub fn complete_payment(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.checkout_mut()?.complete_processing()
    }

    /// Leave the success screen: the order is done, so the cart is emptied
    /// and the checkout is closed. The cart cannot change after `confirm`,
    /// so what is cleared is exactly what was paid for.
    pub fn finish_checkout(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        let phase = self.checkout_mut()?.finish_redirect()?;
        self.cart.clear();
        self.checkout = None;
        Ok(phase)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{PaymentForm, PaymentMethod};
    use crate::Money;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn add_unknown_product_fails() {
        let mut store = Storefront::default();
        assert_eq!(
            store.add_to_cart(&id("nope")).err(),
            Some(StoreError::ProductNotFound(id("nope")))
        );
        assert!(store.cart().is_empty());
    }

    #[test]
    fn add_copies_catalog_fields() {
        let mut store = Storefront::default();
        store.add_to_cart(&id("2")).expect("add");
        let line = store.cart().line(&id("2")).expect("line");
        assert_eq!(line.name, "Fresh Milk");
        assert_eq!(line.price, Money::from_rupees(65));
    }

    #[test]
    fn bills_follow_cart() {
        let mut store = Storefront::default();
        store.add_to_cart(&id("1")).expect("add");
        store.add_to_cart(&id("1")).expect("add");
        assert_eq!(store.bill(BillKind::Drawer).total, Money::from_rupees(110));
        assert_eq!(store.bill(BillKind::Payment).total, Money::from_paise(12440));
    }

    #[test]
    fn search_and_cart_are_independent() {
        let mut store = Storefront::default();
        store.set_query("milk");
        store.add_to_cart(&id("1")).expect("add");
        assert_eq!(store.search().results.len(), 1);
        assert_eq!(store.cart().item_count(), 1);
    }

    #[test]
    fn product_detail_lookup() {
        let store = Storefront::default();
        let detail = store.product_detail(&id("pet1")).expect("detail");
        assert_eq!(detail.rating.to_string(), "4.8");
        assert!(store.product_detail(&id("zzz")).is_err());
    }

    #[test]
    fn checkout_requires_items() {
        let mut store = Storefront::default();
        assert_eq!(store.begin_checkout().err(), Some(CheckoutError::EmptyCart));
        assert_eq!(store.complete_payment().err(), Some(CheckoutError::NotStarted));
    }

    fn confirmed_store(product: &str) -> Storefront {
        let mut store = Storefront::default();
        store.add_to_cart(&id(product)).expect("add");
        store.begin_checkout().expect("begin");

        let flow = store.checkout_mut().expect("flow");
        flow.select_method(PaymentMethod::Upi).expect("method");
        flow.submit_form(PaymentForm {
            name: "Asha".into(),
            email: "asha@example.in".into(),
            phone: "9876543210".into(),
            address: "12 MG Road".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pincode: "560001".into(),
            ..PaymentForm::default()
        })
        .expect("submit");
        flow.confirm().expect("confirm");
        store
    }

    #[test]
    fn finished_checkout_clears_cart() {
        let mut store = confirmed_store("3");

        assert!(store.begin_checkout().is_err());
        assert_eq!(store.complete_payment(), Ok(CheckoutPhase::Success));
        assert_eq!(store.finish_checkout(), Ok(CheckoutPhase::Redirected));
        assert!(store.cart().is_empty());
        assert!(store.checkout().is_none());
    }

    #[test]
    fn cart_is_locked_while_payment_runs() {
        let mut store = confirmed_store("1");
        let locked = Err(StoreError::CartLocked(CheckoutPhase::Processing));

        assert_eq!(store.add_to_cart(&id("2")).cloned(), locked.clone());
        assert_eq!(store.remove_from_cart(&id("1")).cloned(), locked.clone());
        assert_eq!(store.update_quantity(&id("1"), 4).cloned(), locked);

        store.complete_payment().expect("complete");
        assert_eq!(
            store.add_to_cart(&id("2")).err(),
            Some(StoreError::CartLocked(CheckoutPhase::Success))
        );
        assert_eq!(store.cart().item_count(), 1);

        store.finish_checkout().expect("finish");
        assert!(store.cart().is_empty());
        assert_eq!(store.add_to_cart(&id("2")).map(CartState::item_count), Ok(1));
    }

    #[test]
    fn cart_is_open_before_confirmation() {
        let mut store = Storefront::default();
        store.add_to_cart(&id("1")).expect("add");
        store.begin_checkout().expect("begin");
        assert_eq!(store.add_to_cart(&id("1")).map(CartState::item_count), Ok(2));
    }

    #[test]
    fn line_quantity_is_capped() {
        let mut store = Storefront::default();
        store.add_to_cart(&id("1")).expect("add");
        store.update_quantity(&id("1"), MAX_LINE_QUANTITY).expect("update");

        let limit = Some(StoreError::QuantityLimit {
            product: id("1"),
            max: MAX_LINE_QUANTITY,
        });
        assert_eq!(store.add_to_cart(&id("1")).err(), limit);
        assert_eq!(store.update_quantity(&id("1"), MAX_LINE_QUANTITY + 1).err(), limit);
        assert_eq!(store.cart().item_count(), u64::from(MAX_LINE_QUANTITY));
    }
}
