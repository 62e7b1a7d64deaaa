use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::cart::Cart;
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::storage::KeyValueStore;

pub mod cart;
pub mod errors;
pub mod product;
pub mod session;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Storage key holding the product catalog.
pub const PRODUCTS_KEY: &str = "pm_products";
/// Storage key holding the shopping cart.
pub const CART_KEY: &str = "pm_cart";
/// Storage key holding the signed-in account.
pub const USER_KEY: &str = "pm_user";
/// Storage key holding the admin console flag.
pub const ADMIN_AUTH_KEY: &str = "pm_admin_auth";

/// Repository implementation that persists every record as a JSON document
/// under a fixed key of a [`KeyValueStore`].
pub struct StoreRepository<S> {
    storage: Arc<S>, // Arc keeps the repository cheap to clone
}

impl<S> Clone for StoreRepository<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: KeyValueStore> StoreRepository<S> {
    /// Create a new repository over the provided storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> RepositoryResult<Option<T>> {
        match self.storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> RepositoryResult<()> {
        let raw = serde_json::to_string(value)?;
        Ok(self.storage.set(key, &raw)?)
    }

    fn remove_key(&self, key: &str) -> RepositoryResult<()> {
        Ok(self.storage.remove(key)?)
    }
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn create_product(&self, product: &Product) -> RepositoryResult<()>;
    fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
    fn replace_products(&self, products: &[Product]) -> RepositoryResult<()>;
}

/// Read-only operations over the shopping cart.
pub trait CartReader {
    fn get_cart(&self) -> RepositoryResult<Cart>;
}

/// Write operations over the shopping cart.
pub trait CartWriter {
    fn save_cart(&self, cart: &Cart) -> RepositoryResult<()>;
    fn clear_cart(&self) -> RepositoryResult<()>;
}

/// Read-only operations over the signed-in session.
pub trait SessionReader {
    fn current_user(&self) -> RepositoryResult<Option<User>>;
    fn is_admin_authenticated(&self) -> RepositoryResult<bool>;
}

/// Write operations over the signed-in session.
pub trait SessionWriter {
    fn save_user(&self, user: &User) -> RepositoryResult<()>;
    fn clear_user(&self) -> RepositoryResult<()>;
    fn set_admin_authenticated(&self, authenticated: bool) -> RepositoryResult<()>;
}
