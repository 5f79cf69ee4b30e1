//! # Payment Form Validation
//!
//! Field-level checks for the checkout form.
//!
//! - Card fields are only checked when paying by card
//! - Every failing field is reported, not just the first
//! - No field is trimmed or normalized before checking

use super::PaymentMethod;
use crate::primitives::{CARD_NUMBER_DIGITS, CVV_DIGITS, PHONE_DIGITS, PINCODE_DIGITS};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// FORM
// =============================================================================

/// The fields of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    CardNumber,
    ExpiryDate,
    Cvv,
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    Pincode,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CardNumber => "Card number",
            Self::ExpiryDate => "Expiry date",
            Self::Cvv => "CVV",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::Pincode => "Pincode",
        };
        f.write_str(label)
    }
}

/// Raw payment form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl PaymentForm {
    /// Mutable access to a single field.
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::CardNumber => &mut self.card_number,
            FormField::ExpiryDate => &mut self.expiry_date,
            FormField::Cvv => &mut self.cvv,
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Address => &mut self.address,
            FormField::City => &mut self.city,
            FormField::State => &mut self.state,
            FormField::Pincode => &mut self.pincode,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A single field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Invalid card number")]
    InvalidCardNumber,

    #[error("Invalid expiry date (MM/YY)")]
    InvalidExpiry,

    #[error("Invalid CVV")]
    InvalidCvv,

    #[error("{0} is required")]
    MissingRequiredField(FormField),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid pincode")]
    InvalidPincode,
}

impl ValidationError {
    /// The form field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::InvalidCardNumber => FormField::CardNumber,
            Self::InvalidExpiry => FormField::ExpiryDate,
            Self::InvalidCvv => FormField::Cvv,
            Self::MissingRequiredField(field) => *field,
            Self::InvalidEmail => FormField::Email,
            Self::InvalidPhone => FormField::Phone,
            Self::InvalidPincode => FormField::Pincode,
        }
    }
}

/// Every failing field of one submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Check if a field has an error.
    #[must_use]
    pub fn has(&self, field: FormField) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// Drop the error for a field, if any.
    pub fn clear_field(&mut self, field: FormField) {
        self.0.retain(|e| e.field() != field);
    }

    /// Check if there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

// =============================================================================
// FIELD CHECKS
// =============================================================================

/// Exactly `n` ASCII digits.
fn is_digits(s: &str, n: usize) -> bool {
    s.len() == n && s.bytes().all(|b| b.is_ascii_digit())
}

/// `MM/YY` with a month from 01 to 12.
fn is_expiry(s: &str) -> bool {
    let [m1, m2, b'/', y1, y2] = s.as_bytes() else {
        return false;
    };
    if ![m1, m2, y1, y2].iter().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let month = (m1 - b'0') * 10 + (m2 - b'0');
    (1..=12).contains(&month)
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain
/// with at least one character on each side.
fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validate a form for the given payment method.
///
/// Returns every failing field; an empty result means the form can be
/// submitted.
pub fn validate(form: &PaymentForm, method: PaymentMethod) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if method == PaymentMethod::Card {
        if !is_digits(&form.card_number, CARD_NUMBER_DIGITS) {
            errors.push(ValidationError::InvalidCardNumber);
        }
        if !is_expiry(&form.expiry_date) {
            errors.push(ValidationError::InvalidExpiry);
        }
        if !is_digits(&form.cvv, CVV_DIGITS) {
            errors.push(ValidationError::InvalidCvv);
        }
    }

    if form.name.is_empty() {
        errors.push(ValidationError::MissingRequiredField(FormField::Name));
    }
    if !is_email(&form.email) {
        errors.push(ValidationError::InvalidEmail);
    }
    if !is_digits(&form.phone, PHONE_DIGITS) {
        errors.push(ValidationError::InvalidPhone);
    }
    if form.address.is_empty() {
        errors.push(ValidationError::MissingRequiredField(FormField::Address));
    }
    if form.city.is_empty() {
        errors.push(ValidationError::MissingRequiredField(FormField::City));
    }
    if form.state.is_empty() {
        errors.push(ValidationError::MissingRequiredField(FormField::State));
    }
    if !is_digits(&form.pincode, PINCODE_DIGITS) {
        errors.push(ValidationError::InvalidPincode);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

// =============================================================================
// TESTS
// =============================================================================
