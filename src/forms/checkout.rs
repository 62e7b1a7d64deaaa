use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::ShippingDetails;
use crate::domain::user::User;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a recipient name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a phone number.
const PHONE_MAX_LEN: usize = 32;
const PHONE_MAX_LEN_VALIDATOR: u64 = PHONE_MAX_LEN as u64;

/// Maximum allowed length for a delivery address.
const ADDRESS_MAX_LEN: usize = 1024;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = ADDRESS_MAX_LEN as u64;

/// Result type returned by the shipping form helpers.
pub type ShippingFormResult<T> = Result<T, ShippingFormError>;

/// Errors that can occur while processing the shipping form.
#[derive(Debug, Error)]
pub enum ShippingFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}

/// Contact and delivery details collected at the first checkout step.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ShippingForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = PHONE_MAX_LEN_VALIDATOR))]
    pub phone: String,
    #[validate(length(min = 1, max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub address: String,
}

impl ShippingForm {
    /// Form pre-populated with the signed-in user's name and email, the
    /// checkout dialog's initial state.
    pub fn prefill(user: Option<&User>) -> Self {
        Self {
            name: user.map(|user| user.name.clone()).unwrap_or_default(),
            email: user.map(|user| user.email.clone()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Validates and sanitizes the payload into shipping details.
    pub fn into_shipping_details(mut self) -> ShippingFormResult<ShippingDetails> {
        // The email validator rejects surrounding whitespace.
        self.email = self.email.trim().to_string();
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ShippingFormError::EmptyField { field: "name" });
        }

        let phone = sanitize_inline_text(&self.phone);
        if phone.is_empty() {
            return Err(ShippingFormError::EmptyField { field: "phone" });
        }

        let address = sanitize_multiline_text(&self.address);
        if address.is_empty() {
            return Err(ShippingFormError::EmptyField { field: "address" });
        }

        Ok(ShippingDetails {
            name,
            email: self.email,
            phone,
            address,
        })
    }
}
