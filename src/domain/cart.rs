use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductMedia, ProductVariation};

/// Identity of a cart line: the product plus the chosen variation, if any.
///
/// Equality is exact on both parts, so the no-variation line of a product
/// is distinct from every variation line of the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Identifier of the product behind the line.
    pub product_id: String,
    /// Identifier of the chosen variation, when one was picked.
    pub variation_id: Option<String>,
}

impl LineKey {
    /// Key for a product added without picking a variation.
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            variation_id: None,
        }
    }

    /// Key for a product added with a specific variation.
    pub fn for_variation(product_id: impl Into<String>, variation_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            variation_id: Some(variation_id.into()),
        }
    }
}

/// One entry in the cart: a snapshot of the product at the time it was
/// added, the chosen variation, and a quantity of at least one.
///
/// The snapshot's `price_cents` holds the effective price with any
/// variation override applied, so totals never re-read the catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Number of units, never below one.
    pub quantity: i64,
    /// Variation chosen when the line was created.
    pub variation: Option<ProductVariation>,
}

impl CartLine {
    /// Snapshot `product` (and the chosen variation) into a quantity-one
    /// line priced at the effective price.
    pub fn new(product: &Product, variation: Option<&ProductVariation>) -> Self {
        let mut snapshot = product.clone();
        snapshot.price_cents = product.effective_price_cents(variation);

        Self {
            product: snapshot,
            quantity: 1,
            variation: variation.cloned(),
        }
    }

    /// Identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id.clone(),
            variation_id: self
                .variation
                .as_ref()
                .map(|variation| variation.id.clone()),
        }
    }

    /// Price of a single unit in the smallest currency unit.
    pub fn unit_price_cents(&self) -> i64 {
        self.product.price_cents
    }

    /// Line subtotal in the smallest currency unit.
    pub fn total_cents(&self) -> i64 {
        self.product.price_cents * self.quantity
    }

    /// Gallery entry shown for this line: the variation's media when it
    /// points at one, else the first gallery entry.
    pub fn display_media(&self) -> Option<&ProductMedia> {
        let index = self
            .variation
            .as_ref()
            .and_then(|variation| variation.media_index)
            .unwrap_or(0);

        self.product
            .media
            .get(index)
            .or_else(|| self.product.media.first())
    }
}

/// Ordered collection of cart lines. Insertion order is display order and
/// carries no other meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted lines.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart, yielding its lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Line under `key`, if present.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key() == *key)
    }

    /// Adds one unit of `product` with the chosen variation. An existing
    /// line with the same identity gains a unit; otherwise a new snapshot
    /// line is appended.
    pub fn add(&mut self, product: &Product, variation: Option<&ProductVariation>) {
        let key = LineKey {
            product_id: product.id.clone(),
            variation_id: variation.map(|variation| variation.id.clone()),
        };

        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine::new(product, variation));
    }

    /// Removes the line whose identity matches `key` exactly. Lines for
    /// other variations of the same product stay untouched.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|line| line.key() != *key);
    }

    /// Applies `delta` to the quantity of the line under `key`, clamping at
    /// one. A missing key leaves the cart unchanged; dropping a line is
    /// only possible through [`Cart::remove`].
    pub fn change_quantity(&mut self, key: &LineKey, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == *key) {
            line.quantity = (line.quantity + delta).max(1);
        }
    }

    /// Sum of line subtotals in the smallest currency unit.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(CartLine::total_cents).sum()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
