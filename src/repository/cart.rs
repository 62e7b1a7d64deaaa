use crate::domain::cart::Cart;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CART_KEY, CartReader, CartWriter, StoreRepository};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> CartReader for StoreRepository<S> {
    fn get_cart(&self) -> RepositoryResult<Cart> {
        Ok(self.read_json::<Cart>(CART_KEY)?.unwrap_or_default())
    }
}

impl<S: KeyValueStore> CartWriter for StoreRepository<S> {
    fn save_cart(&self, cart: &Cart) -> RepositoryResult<()> {
        self.write_json(CART_KEY, cart)
    }

    fn clear_cart(&self) -> RepositoryResult<()> {
        self.remove_key(CART_KEY)
    }
}
