use crate::domain::cart::{Cart, LineKey};
use crate::repository::{CartReader, CartWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// UI surface the caller should open after a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSignal {
    /// Show the cart drawer.
    OpenCart,
    /// Jump straight into checkout.
    OpenCheckout,
}

/// Result of a cart mutation: the persisted cart plus the follow-up signal.
#[derive(Debug)]
pub struct CartUpdate {
    pub cart: Cart,
    pub signal: Option<CartSignal>,
}

/// Loads the persisted cart.
pub fn load_cart<R>(repo: &R) -> ServiceResult<Cart>
where
    R: CartReader + ?Sized,
{
    repo.get_cart().map_err(ServiceError::from)
}

/// Adds one unit of a product (and optional variation) to the cart.
///
/// Resolves both against the catalog (`NotFound` on either), snapshots the
/// effective price, persists the cart and signals the cart drawer.
pub fn add_to_cart<R>(
    repo: &R,
    product_id: &str,
    variation_id: Option<&str>,
) -> ServiceResult<CartUpdate>
where
    R: ProductReader + CartReader + CartWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let variation = match variation_id {
        Some(id) => Some(product.variation(id).ok_or(ServiceError::NotFound)?.clone()),
        None => None,
    };

    let mut cart = repo.get_cart().map_err(ServiceError::from)?;
    cart.add(&product, variation.as_ref());
    repo.save_cart(&cart).map_err(ServiceError::from)?;

    Ok(CartUpdate {
        cart,
        signal: Some(CartSignal::OpenCart),
    })
}

/// Adds to the cart and signals an immediate jump into checkout.
pub fn buy_now<R>(
    repo: &R,
    product_id: &str,
    variation_id: Option<&str>,
) -> ServiceResult<CartUpdate>
where
    R: ProductReader + CartReader + CartWriter + ?Sized,
{
    let update = add_to_cart(repo, product_id, variation_id)?;

    Ok(CartUpdate {
        cart: update.cart,
        signal: Some(CartSignal::OpenCheckout),
    })
}

/// Removes the line whose identity matches `key` exactly.
pub fn remove_line<R>(repo: &R, key: &LineKey) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter + ?Sized,
{
    let mut cart = repo.get_cart().map_err(ServiceError::from)?;
    cart.remove(key);
    repo.save_cart(&cart).map_err(ServiceError::from)?;

    Ok(cart)
}

/// Applies a quantity delta to the line under `key`, clamping at one.
pub fn change_quantity<R>(repo: &R, key: &LineKey, delta: i64) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter + ?Sized,
{
    let mut cart = repo.get_cart().map_err(ServiceError::from)?;
    cart.change_quantity(key, delta);
    repo.save_cart(&cart).map_err(ServiceError::from)?;

    Ok(cart)
}

/// Drops the persisted cart.
pub fn clear_cart<R>(repo: &R) -> ServiceResult<()>
where
    R: CartWriter + ?Sized,
{
    repo.clear_cart().map_err(ServiceError::from)
}
