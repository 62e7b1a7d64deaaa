use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::NewUser;
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a display name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for an email address.
const EMAIL_MAX_LEN: usize = 254;
const EMAIL_MAX_LEN_VALIDATOR: u64 = EMAIL_MAX_LEN as u64;

/// Result type returned by the auth form helpers.
pub type AuthFormResult<T> = Result<T, AuthFormError>;

/// Errors that can occur while processing auth forms.
#[derive(Debug, Error)]
pub enum AuthFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("name cannot be empty")]
    EmptyName,
}

/// Form payload emitted by the sign-in dialog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: String,
    /// Accepted as-is; the storefront simulates authentication and never
    /// verifies credentials.
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Validates the payload into a new-account request without a name.
    pub fn into_new_user(mut self) -> AuthFormResult<NewUser> {
        // The email validator rejects surrounding whitespace.
        self.email = self.email.trim().to_string();
        self.validate()?;

        Ok(NewUser::new(self.email))
    }
}

/// Form payload emitted by the registration dialog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl SignUpForm {
    /// Validates and sanitizes the payload into a new-account request.
    pub fn into_new_user(mut self) -> AuthFormResult<NewUser> {
        self.email = self.email.trim().to_string();
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(AuthFormError::EmptyName);
        }

        Ok(NewUser::new(self.email).with_name(name))
    }
}

/// Form payload emitted by the admin console sign-in screen.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginForm {
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: String,
    #[validate(length(min = 1))]
    pub security_key: String,
}

/// Credential pair extracted from the admin sign-in form.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    /// Compared exactly, so no sanitization is applied.
    pub security_key: String,
}

impl AdminLoginForm {
    pub fn into_credentials(mut self) -> AuthFormResult<AdminCredentials> {
        self.email = self.email.trim().to_string();
        self.validate()?;

        Ok(AdminCredentials {
            email: self.email,
            security_key: self.security_key,
        })
    }
}
