use crate::domain::product::Product;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{PRODUCTS_KEY, ProductReader, ProductWriter, StoreRepository};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> ProductReader for StoreRepository<S> {
    fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>> {
        let products = self.list_products()?;
        Ok(products.into_iter().find(|product| product.id == product_id))
    }

    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .read_json::<Vec<Product>>(PRODUCTS_KEY)?
            .unwrap_or_default())
    }
}

impl<S: KeyValueStore> ProductWriter for StoreRepository<S> {
    fn create_product(&self, product: &Product) -> RepositoryResult<()> {
        let mut products = self.list_products()?;
        // Newest product first, matching the catalog display order.
        products.insert(0, product.clone());
        self.write_json(PRODUCTS_KEY, &products)
    }

    fn delete_product(&self, product_id: &str) -> RepositoryResult<()> {
        let mut products = self.list_products()?;
        let before = products.len();
        products.retain(|product| product.id != product_id);

        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        self.write_json(PRODUCTS_KEY, &products)
    }

    fn replace_products(&self, products: &[Product]) -> RepositoryResult<()> {
        self.write_json(PRODUCTS_KEY, products)
    }
}
