use mockall::mock;

use super::{
    CartReader, CartWriter, ProductReader, ProductWriter, SessionReader, SessionWriter,
};
use crate::domain::{cart::Cart, product::Product, user::User};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, product: &Product) -> RepositoryResult<()>;
        fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
        fn replace_products(&self, products: &[Product]) -> RepositoryResult<()>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn get_cart(&self) -> RepositoryResult<Cart>;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn save_cart(&self, cart: &Cart) -> RepositoryResult<()>;
        fn clear_cart(&self) -> RepositoryResult<()>;
    }
}

mock! {
    pub SessionReader {}

    impl SessionReader for SessionReader {
        fn current_user(&self) -> RepositoryResult<Option<User>>;
        fn is_admin_authenticated(&self) -> RepositoryResult<bool>;
    }
}

mock! {
    pub SessionWriter {}

    impl SessionWriter for SessionWriter {
        fn save_user(&self, user: &User) -> RepositoryResult<()>;
        fn clear_user(&self) -> RepositoryResult<()>;
        fn set_admin_authenticated(&self, authenticated: bool) -> RepositoryResult<()>;
    }
}
