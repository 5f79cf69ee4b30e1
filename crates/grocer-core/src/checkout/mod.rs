//! # Checkout Module
//!
//! The mock checkout flow: payment form, validation and the state machine
//! that walks an order from editing to the post-payment redirect.
//!
//! ```text
//! Editing --submit(valid)--> Confirming --confirm--> Processing
//!    ^                           |                       |
//!    +-----cancel_confirmation---+              complete_processing
//!                                                        v
//!                          Redirected <--finish_redirect-- Success
//! ```
//!
//! The machine itself has no clock. Whoever owns it schedules
//! `complete_processing` and `finish_redirect` after the simulated delays.

mod validation;

pub use validation::{FormField, PaymentForm, ValidationError, ValidationErrors, validate};

use crate::cart::CartState;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// PAYMENT METHOD
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    CashOnDelivery,
}

// =============================================================================
// PHASES
// =============================================================================

/// Where the checkout currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Filling in the form.
    #[default]
    Editing,
    /// Form accepted, waiting for the customer to confirm.
    Confirming,
    /// Simulated payment in flight.
    Processing,
    /// Payment done, success screen showing.
    Success,
    /// Success screen dismissed, back to the storefront.
    Redirected,
}

impl CheckoutPhase {
    /// Payment is in flight or done, so the cart is what is being paid for.
    #[must_use]
    pub const fn holds_cart(self) -> bool {
        matches!(self, Self::Processing | Self::Success)
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Editing => "editing",
            Self::Confirming => "confirming",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Redirected => "redirected",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised by the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout was started with nothing in the cart.
    #[error("Please add items to your cart before proceeding to payment")]
    EmptyCart,

    /// A checkout step was requested but no checkout has been started.
    #[error("No checkout in progress")]
    NotStarted,

    /// The requested step is not allowed from the current phase.
    #[error("Cannot {action} while checkout is {from}")]
    InvalidTransition {
        from: CheckoutPhase,
        action: &'static str,
    },

    /// The submitted form has invalid fields.
    #[error("Payment form rejected: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// CHECKOUT FLOW
// =============================================================================

/// One checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    method: PaymentMethod,
    form: PaymentForm,
    errors: ValidationErrors,
}

impl CheckoutFlow {
    /// Start a checkout for `cart`.
    ///
    /// Fails with `CheckoutError::EmptyCart` when the cart has no lines.
    pub fn begin(cart: &CartState) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self::default())
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Selected payment method.
    #[must_use]
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Form contents as last edited or submitted.
    #[must_use]
    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    /// Field errors from the last rejected submission that are still
    /// outstanding.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn require(&self, phase: CheckoutPhase, action: &'static str) -> Result<(), CheckoutError> {
        if self.phase != phase {
            return Err(CheckoutError::InvalidTransition {
                from: self.phase,
                action,
            });
        }
        Ok(())
    }

    /// Pick a payment method.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Editing, "change payment method")?;
        self.method = method;
        Ok(())
    }

    /// Change one field. Any error shown for that field is cleared.
    pub fn edit_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        self.require(CheckoutPhase::Editing, "edit the form")?;
        *self.form.field_mut(field) = value.into();
        self.errors.clear_field(field);
        Ok(())
    }

    /// Replace the form and submit it.
    pub fn submit_form(&mut self, form: PaymentForm) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Editing, "submit")?;
        self.form = form;
        self.submit()
    }

    /// Submit the current form.
    ///
    /// On success moves to `Confirming`. On failure stays in `Editing`,
    /// records the field errors and returns them.
    pub fn submit(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Editing, "submit")?;
        match validate(&self.form, self.method) {
            Ok(()) => {
                self.errors = ValidationErrors::default();
                self.phase = CheckoutPhase::Confirming;
                Ok(self.phase)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(CheckoutError::Validation(errors))
            }
        }
    }

    /// Back out of the confirmation step.
    pub fn cancel_confirmation(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Confirming, "cancel confirmation")?;
        self.phase = CheckoutPhase::Editing;
        Ok(self.phase)
    }

    /// Confirm the payment. Moves to `Processing` immediately.
    pub fn confirm(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Confirming, "confirm payment")?;
        self.phase = CheckoutPhase::Processing;
        Ok(self.phase)
    }

    /// The simulated payment has finished.
    pub fn complete_processing(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Processing, "complete processing")?;
        self.phase = CheckoutPhase::Success;
        Ok(self.phase)
    }

    /// The success screen has been dismissed.
    pub fn finish_redirect(&mut self) -> Result<CheckoutPhase, CheckoutError> {
        self.require(CheckoutPhase::Success, "redirect")?;
        self.phase = CheckoutPhase::Redirected;
        Ok(self.phase)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartLineItem, Money, ProductId};
    use crate::cart::{CartAction, ZeroQuantityPolicy, reduce};

    fn cart_with_bananas() -> CartState {
        let item = CartLineItem {
            id: ProductId::new("1"),
            name: "Organic Bananas".into(),
            price: Money::from_rupees(40),
            image: String::new(),
            quantity: 1,
        };
        reduce(CartState::new(), &CartAction::Add(item), ZeroQuantityPolicy::Retain)
    }

    fn cod_form() -> PaymentForm {
        PaymentForm {
            name: "Asha Rao".into(),
            email: "asha@example.in".into(),
            phone: "9876543210".into(),
            address: "12 MG Road".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pincode: "560001".into(),
            ..PaymentForm::default()
        }
    }

    fn confirming_flow() -> CheckoutFlow {
        let mut flow = CheckoutFlow::begin(&cart_with_bananas()).expect("begin");
        flow.select_method(PaymentMethod::CashOnDelivery).expect("method");
        flow.submit_form(cod_form()).expect("submit");
        flow
    }

    #[test]
    fn empty_cart_blocks_checkout() {
        assert_eq!(
            CheckoutFlow::begin(&CartState::new()).err(),
            Some(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn invalid_card_keeps_editing() {
        let mut flow = CheckoutFlow::begin(&cart_with_bananas()).expect("begin");
        let mut form = cod_form();
        form.card_number = "123".into();
        form.expiry_date = "12/29".into();
        form.cvv = "999".into();

        let err = flow.submit_form(form).expect_err("rejected");

        assert_eq!(
            err,
            CheckoutError::Validation(ValidationErrors(vec![ValidationError::InvalidCardNumber]))
        );
        assert_eq!(flow.phase(), CheckoutPhase::Editing);
        assert!(flow.errors().has(FormField::CardNumber));
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut flow = CheckoutFlow::begin(&cart_with_bananas()).expect("begin");
        let _ = flow.submit();
        assert!(flow.errors().has(FormField::Email));

        flow.edit_field(FormField::Email, "a@b.co").expect("edit");

        assert!(!flow.errors().has(FormField::Email));
        assert!(flow.errors().has(FormField::Name));
    }

    #[test]
    fn full_happy_path() {
        let mut flow = confirming_flow();
        assert_eq!(flow.phase(), CheckoutPhase::Confirming);
        assert_eq!(flow.confirm(), Ok(CheckoutPhase::Processing));
        assert_eq!(flow.complete_processing(), Ok(CheckoutPhase::Success));
        assert_eq!(flow.finish_redirect(), Ok(CheckoutPhase::Redirected));
    }

    #[test]
    fn cancel_returns_to_editing() {
        let mut flow = confirming_flow();
        assert_eq!(flow.cancel_confirmation(), Ok(CheckoutPhase::Editing));
        assert!(flow.confirm().is_err());
    }

    #[test]
    fn out_of_order_steps_rejected() {
        let mut flow = CheckoutFlow::begin(&cart_with_bananas()).expect("begin");
        assert!(matches!(
            flow.confirm(),
            Err(CheckoutError::InvalidTransition {
                from: CheckoutPhase::Editing,
                ..
            })
        ));
        assert!(flow.complete_processing().is_err());

        let mut flow = confirming_flow();
        flow.confirm().expect("confirm");
        assert!(flow.select_method(PaymentMethod::Upi).is_err());
        assert!(flow.edit_field(FormField::Name, "x").is_err());
        assert!(flow.finish_redirect().is_err());
    }

    #[test]
    fn transition_error_message() {
        let err = CheckoutError::InvalidTransition {
            from: CheckoutPhase::Processing,
            action: "submit",
        };
        assert_eq!(err.to_string(), "Cannot submit while checkout is processing");
    }
}
