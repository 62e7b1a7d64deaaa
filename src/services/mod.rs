use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::repository::SessionReader;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod products;

/// Result type returned by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller is not signed in to the admin console.
    #[error("unauthorized")]
    Unauthorized,
    /// The admin credentials did not match the configured ones.
    #[error("Unauthorized: Incorrect Admin Email or Security Key.")]
    InvalidAdminCredentials,
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,
    /// A submitted form failed validation.
    #[error("{0}")]
    Form(String),
    /// Checkout cannot start from an empty cart.
    #[error("the cart is empty")]
    EmptyCart,
    /// The checkout flow is not at the step this operation expects.
    #[error("checkout is not at the {expected} step")]
    CheckoutStepMismatch { expected: &'static str },
    /// The checkout flow already produced its order.
    #[error("checkout already completed")]
    CheckoutCompleted,
    /// An export document could not be produced.
    #[error("export failed: {0}")]
    Export(String),
    /// A repository operation failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

/// Admin-console gate: every admin operation starts here.
pub(crate) fn ensure_admin<R>(repo: &R) -> ServiceResult<()>
where
    R: SessionReader + ?Sized,
{
    if repo.is_admin_authenticated().map_err(ServiceError::from)? {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Blocks for the configured simulated latency. Zero means no pause.
pub(crate) fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
