use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::ids::IdGenerator;

/// Stock assigned to a product when the admin form leaves the field blank.
pub const DEFAULT_STOCK: i64 = 10;
/// Rating assigned to a freshly added product before anyone reviews it.
pub const DEFAULT_RATING: f32 = 5.0;

/// Kind of media entry in a product gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single image or video in a product gallery.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductMedia {
    /// Location of the asset.
    pub url: String,
    /// Whether the asset is an image or a video clip.
    pub kind: MediaKind,
}

impl ProductMedia {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Image,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
        }
    }
}

/// A purchasable option of a product, such as a colour or size.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductVariation {
    /// Identifier, unique within the parent product.
    pub id: String,
    /// Label shown to shoppers.
    pub name: String,
    /// Price override in the smallest currency unit. Absent means the
    /// parent product's price applies.
    pub price_cents: Option<i64>,
    /// Units available for this variation. Tracked independently of the
    /// parent product's stock.
    pub stock: i64,
    /// Index into the parent gallery illustrating this variation.
    pub media_index: Option<usize>,
}

/// A shopper review attached to a product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    /// Unique identifier of the review.
    pub id: String,
    /// Display name of the reviewer.
    pub user_name: String,
    /// Star rating between 0 and 5.
    pub rating: f32,
    /// Free-form review text.
    pub comment: String,
    /// Timestamp for when the review was written.
    pub created_at: NaiveDateTime,
}

/// Catalog entry shoppers browse and buy.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Current price in the smallest currency unit.
    pub price_cents: i64,
    /// Optional previous price shown struck through next to the current one.
    pub old_price_cents: Option<i64>,
    /// Longer description shown on the detail view.
    pub description: String,
    /// Category the product is listed under.
    pub category: Category,
    /// Ordered gallery of images and videos. Expected to be non-empty.
    pub media: Vec<ProductMedia>,
    /// Index of the gallery entry used as the cover.
    #[serde(default)]
    pub primary_index: usize,
    /// Average star rating between 0 and 5.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub reviews_count: i64,
    /// Units available of the base product.
    pub stock: i64,
    /// Whether the product takes part in the flash-sale banner.
    #[serde(default)]
    pub is_flash_sale: bool,
    /// Purchasable variations. Empty for single-option products.
    #[serde(default)]
    pub variations: Vec<ProductVariation>,
    /// Shopper reviews. Empty until reviews are collected.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Timestamp for when the product was added to the catalog.
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Looks up a variation by identifier.
    pub fn variation(&self, variation_id: &str) -> Option<&ProductVariation> {
        self.variations
            .iter()
            .find(|variation| variation.id == variation_id)
    }

    /// Price to charge when `variation` is the chosen one: the variation's
    /// own price when set, else the parent price.
    pub fn effective_price_cents(&self, variation: Option<&ProductVariation>) -> i64 {
        variation
            .and_then(|variation| variation.price_cents)
            .unwrap_or(self.price_cents)
    }

    /// Units available for the chosen variation, or the base product when
    /// none is chosen. The two stocks are independent counters.
    pub fn effective_stock(&self, variation: Option<&ProductVariation>) -> i64 {
        variation
            .map(|variation| variation.stock)
            .unwrap_or(self.stock)
    }

    /// Gallery entry used as the cover. An out-of-range `primary_index`
    /// falls back to the first entry.
    pub fn primary_media(&self) -> Option<&ProductMedia> {
        self.media
            .get(self.primary_index)
            .or_else(|| self.media.first())
    }

    /// Price in whole currency units, for display and reports.
    pub fn price(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }

    /// Rounded discount percentage against the old price, when one is set.
    pub fn discount_percent(&self) -> Option<i64> {
        let old_price = self.old_price_cents.filter(|cents| *cents > 0)?;
        let fraction = 1.0 - self.price_cents as f64 / old_price as f64;
        Some((fraction * 100.0).round() as i64)
    }
}

/// Payload describing a variation before it has an identifier.
#[derive(Debug, Clone)]
pub struct NewVariation {
    /// Label shown to shoppers.
    pub name: String,
    /// Optional price override in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Units available for this variation.
    pub stock: i64,
    /// Optional index into the parent gallery.
    pub media_index: Option<usize>,
}

impl NewVariation {
    /// Build a variation payload with the supplied label and stock.
    pub fn new(name: impl Into<String>, stock: i64) -> Self {
        Self {
            name: name.into(),
            price_cents: None,
            stock,
            media_index: None,
        }
    }

    /// Override the parent price for this variation.
    pub fn with_price(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Point the variation at a specific gallery entry.
    pub fn with_media_index(mut self, media_index: usize) -> Self {
        self.media_index = Some(media_index);
        self
    }

    /// Materialize the variation under the supplied identifier.
    pub fn into_variation(self, id: impl Into<String>) -> ProductVariation {
        ProductVariation {
            id: id.into(),
            name: self.name,
            price_cents: self.price_cents,
            stock: self.stock,
            media_index: self.media_index,
        }
    }
}

/// Payload required to add a product to the catalog.
///
/// Carries the admin-console defaults: category Personalized, stock
/// [`DEFAULT_STOCK`], rating [`DEFAULT_RATING`] with no reviews, and the
/// first gallery entry as cover.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Current price in the smallest currency unit.
    pub price_cents: i64,
    /// Optional previous price for discount display.
    pub old_price_cents: Option<i64>,
    /// Longer description shown on the detail view.
    pub description: String,
    /// Category the product is listed under.
    pub category: Category,
    /// Ordered gallery of images and videos.
    pub media: Vec<ProductMedia>,
    /// Index of the gallery entry used as the cover.
    pub primary_index: usize,
    /// Initial star rating.
    pub rating: f32,
    /// Initial review count.
    pub reviews_count: i64,
    /// Units available of the base product.
    pub stock: i64,
    /// Whether the product takes part in the flash-sale banner.
    pub is_flash_sale: bool,
    /// Variations to create alongside the product.
    pub variations: Vec<NewVariation>,
}

impl NewProduct {
    /// Build a product payload with the supplied details and the admin
    /// defaults for everything else.
    pub fn new(name: impl Into<String>, price_cents: i64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_cents,
            old_price_cents: None,
            description: description.into(),
            category: Category::Personalized,
            media: Vec::new(),
            primary_index: 0,
            rating: DEFAULT_RATING,
            reviews_count: 0,
            stock: DEFAULT_STOCK,
            is_flash_sale: false,
            variations: Vec::new(),
        }
    }

    /// Attach a previous price for discount display.
    pub fn with_old_price(mut self, old_price_cents: i64) -> Self {
        self.old_price_cents = Some(old_price_cents);
        self
    }

    /// List the product under a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Attach the product gallery.
    pub fn with_media(mut self, media: Vec<ProductMedia>) -> Self {
        self.media = media;
        self
    }

    /// Select which gallery entry is the cover.
    pub fn with_primary_index(mut self, primary_index: usize) -> Self {
        self.primary_index = primary_index;
        self
    }

    /// Seed the rating and review count.
    pub fn with_rating(mut self, rating: f32, reviews_count: i64) -> Self {
        self.rating = rating;
        self.reviews_count = reviews_count;
        self
    }

    /// Set the available stock of the base product.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Mark the product as part of the flash sale.
    pub fn with_flash_sale(mut self) -> Self {
        self.is_flash_sale = true;
        self
    }

    /// Attach variations to create alongside the product.
    pub fn with_variations(mut self, variations: Vec<NewVariation>) -> Self {
        self.variations = variations;
        self
    }

    /// Materialize the product, drawing identifiers for it and every
    /// variation from `ids`.
    pub fn into_product<G>(self, ids: &G, created_at: NaiveDateTime) -> Product
    where
        G: IdGenerator + ?Sized,
    {
        let NewProduct {
            name,
            price_cents,
            old_price_cents,
            description,
            category,
            media,
            primary_index,
            rating,
            reviews_count,
            stock,
            is_flash_sale,
            variations,
        } = self;

        let variations = variations
            .into_iter()
            .map(|variation| variation.into_variation(ids.record_id()))
            .collect();

        Product {
            id: ids.record_id(),
            name,
            price_cents,
            old_price_cents,
            description,
            category,
            media,
            primary_index,
            rating,
            reviews_count,
            stock,
            is_flash_sale,
            variations,
            reviews: Vec::new(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::ids::SequentialIds;

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Elegant Crystal Vase".to_string(),
            price_cents: 1500_00,
            old_price_cents: Some(1800_00),
            description: "A handcrafted crystal vase.".to_string(),
            category: Category::HomeDecor,
            media: vec![
                ProductMedia::image("https://example.com/vase-front.jpg"),
                ProductMedia::image("https://example.com/vase-side.jpg"),
            ],
            primary_index: 0,
            rating: 4.8,
            reviews_count: 12,
            stock: 5,
            is_flash_sale: true,
            variations: vec![
                ProductVariation {
                    id: "v1".to_string(),
                    name: "Transparent".to_string(),
                    price_cents: None,
                    stock: 5,
                    media_index: None,
                },
                ProductVariation {
                    id: "v2".to_string(),
                    name: "Smoky Grey".to_string(),
                    price_cents: Some(1700_00),
                    stock: 2,
                    media_index: Some(1),
                },
            ],
            reviews: Vec::new(),
            created_at: fixed_datetime(),
        }
    }

    #[test]
    fn effective_price_prefers_variation_override() {
        let product = sample_product();
        let with_override = product.variation("v2");
        let without_override = product.variation("v1");

        assert_eq!(product.effective_price_cents(with_override), 1700_00);
        assert_eq!(product.effective_price_cents(without_override), 1500_00);
        assert_eq!(product.effective_price_cents(None), 1500_00);
    }

    #[test]
    fn effective_stock_tracks_each_counter_separately() {
        let product = sample_product();

        assert_eq!(product.effective_stock(None), 5);
        assert_eq!(product.effective_stock(product.variation("v2")), 2);
    }

    #[test]
    fn variation_lookup_by_id() {
        let product = sample_product();

        assert_eq!(
            product.variation("v2").map(|v| v.name.as_str()),
            Some("Smoky Grey")
        );
        assert!(product.variation("v9").is_none());
    }

    #[test]
    fn primary_media_falls_back_to_first_entry() {
        let mut product = sample_product();
        product.primary_index = 7;

        let media = product.primary_media().expect("media present");
        assert_eq!(media.url, "https://example.com/vase-front.jpg");
    }

    #[test]
    fn discount_percent_rounds_against_old_price() {
        let product = sample_product();
        assert_eq!(product.discount_percent(), Some(17));

        let mut without_old = sample_product();
        without_old.old_price_cents = None;
        assert_eq!(without_old.discount_percent(), None);
    }

    #[test]
    fn new_product_carries_admin_defaults() {
        let payload = NewProduct::new("Scented Candle", 450_00, "Lavender scented candle.");

        assert_eq!(payload.category, Category::Personalized);
        assert_eq!(payload.stock, DEFAULT_STOCK);
        assert_eq!(payload.rating, DEFAULT_RATING);
        assert_eq!(payload.reviews_count, 0);
        assert_eq!(payload.primary_index, 0);
        assert!(!payload.is_flash_sale);
    }

    #[test]
    fn into_product_assigns_ids_to_product_and_variations() {
        let ids = SequentialIds::new();
        let payload = NewProduct::new("Scented Candle", 450_00, "Lavender scented candle.")
            .with_media(vec![ProductMedia::image("https://example.com/candle.jpg")])
            .with_variations(vec![
                NewVariation::new("Small", 4),
                NewVariation::new("Large", 2).with_price(650_00),
            ]);

        let product = payload.into_product(&ids, fixed_datetime());

        assert_eq!(product.variations[0].id, "rec-1");
        assert_eq!(product.variations[1].id, "rec-2");
        assert_eq!(product.id, "rec-3");
        assert_eq!(product.variations[1].price_cents, Some(650_00));
        assert_eq!(product.created_at, fixed_datetime());
        assert!(product.reviews.is_empty());
    }
}
