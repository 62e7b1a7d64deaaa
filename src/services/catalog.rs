use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::clock::Clock;
use crate::domain::category::Category;
use crate::domain::product::{NewVariation, Product, ProductMedia};
use crate::domain::user::User;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Relevance weight applied to a match in the product name.
const NAME_WEIGHT: f64 = 1.0;
/// Relevance weight applied to a match in the description.
const DESCRIPTION_WEIGHT: f64 = 0.5;
/// Relevance weight applied to a match in the category label.
const CATEGORY_WEIGHT: f64 = 0.3;

/// Scores how well `text` matches `query`.
///
/// Lowercases both sides. A full substring match scores 100. Otherwise the
/// query is split on whitespace, keywords of length one are dropped, and
/// each keyword contributes 25 for a substring hit or 10 for a near-complete
/// in-order character walk (at least `len - 1` characters found, keyword
/// longer than three characters).
pub fn match_score(text: &str, query: &str) -> u32 {
    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text.contains(query.as_str()) {
        return 100;
    }

    let mut score = 0;
    for keyword in query.split_whitespace() {
        let length = keyword.chars().count();
        if length <= 1 {
            continue;
        }

        if text.contains(keyword) {
            score += 25;
            continue;
        }

        // Greedy walk: each character is searched after the previous hit;
        // a miss leaves the cursor in place.
        let mut found = 0usize;
        let mut cursor = 0usize;
        for ch in keyword.chars() {
            if let Some(offset) = text[cursor..].find(ch) {
                found += 1;
                cursor += offset + ch.len_utf8();
            }
        }

        if found >= length - 1 && length > 3 {
            score += 10;
        }
    }

    score
}

/// Weighted relevance of a product against a search query.
fn relevance(product: &Product, query: &str) -> f64 {
    f64::from(match_score(&product.name, query)) * NAME_WEIGHT
        + f64::from(match_score(&product.description, query)) * DESCRIPTION_WEIGHT
        + f64::from(match_score(product.category.as_str(), query)) * CATEGORY_WEIGHT
}

/// Applies the category filter and search ranking to a product list.
///
/// The category filter preserves the input order. A trimmed-empty search
/// returns the filtered list unchanged; otherwise only products with a
/// positive relevance survive, ordered by descending score with ascending
/// product id as the tie-break.
pub fn filter_and_rank(
    products: Vec<Product>,
    category: Option<Category>,
    search: &str,
) -> Vec<Product> {
    let filtered: Vec<Product> = products
        .into_iter()
        .filter(|product| category.is_none_or(|wanted| product.category == wanted))
        .collect();

    let query = search.trim();
    if query.is_empty() {
        return filtered;
    }

    let mut scored: Vec<(f64, Product)> = filtered
        .into_iter()
        .filter_map(|product| {
            let score = relevance(&product, query);
            (score > 0.0).then_some((score, product))
        })
        .collect();

    scored.sort_by(|(score_a, product_a), (score_b, product_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| product_a.id.cmp(&product_b.id))
    });

    scored.into_iter().map(|(_, product)| product).collect()
}

/// Query parameters accepted by the storefront grid.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogQuery {
    /// Optional search string entered by the shopper.
    pub search: Option<String>,
    /// Optional category filter; `None` means "All".
    pub category: Option<Category>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a fuzzy search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results to a single category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Data required to render the storefront grid.
#[derive(Debug)]
pub struct CatalogPage {
    /// Products matching the query, ranked when a search term is present.
    pub products: Vec<Product>,
    /// Flash-sale products, independent of the active filter.
    pub flash_sale: Vec<Product>,
    /// Search term echoed back to the view when present.
    pub search: Option<String>,
    /// Category filter echoed back to the view when present.
    pub category: Option<Category>,
}

/// Loads the storefront grid for the given query.
pub fn browse_catalog<R>(repo: &R, query: CatalogQuery) -> ServiceResult<CatalogPage>
where
    R: ProductReader + ?Sized,
{
    let CatalogQuery { search, category } = query;

    let products = repo.list_products().map_err(ServiceError::from)?;

    let flash_sale: Vec<Product> = products
        .iter()
        .filter(|product| product.is_flash_sale)
        .cloned()
        .collect();

    let ranked = filter_and_rank(products, category, search.as_deref().unwrap_or(""));

    Ok(CatalogPage {
        products: ranked,
        flash_sale,
        search,
        category,
    })
}

/// Looks up a single product for the details view.
pub fn product_details<R>(repo: &R, product_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Seeds the shipped three-product catalog when the stored one is absent or
/// empty, and returns the catalog either way.
pub fn initialize_catalog<R, C>(repo: &R, clock: &C) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ProductWriter + ?Sized,
    C: Clock + ?Sized,
{
    let existing = repo.list_products().map_err(ServiceError::from)?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    let seeded = default_catalog(clock.now());
    repo.replace_products(&seeded).map_err(ServiceError::from)?;
    log::info!("seeded the default catalog with {} products", seeded.len());

    Ok(seeded)
}

/// Products the user saved for later, in catalog order.
pub fn wishlist_products<R>(repo: &R, user: &User) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;

    Ok(products
        .into_iter()
        .filter(|product| user.wishlist.iter().any(|id| *id == product.id))
        .collect())
}

/// The catalog the shop ships with, staggered so the newest product sorts
/// first by creation time.
fn default_catalog(now: NaiveDateTime) -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Elegant Crystal Vase".to_string(),
            price_cents: 1500_00,
            old_price_cents: Some(1800_00),
            description: "A handcrafted crystal vase perfect for any living room setting. \
                          Unique patterns that reflect light beautifully."
                .to_string(),
            category: Category::HomeDecor,
            media: vec![
                ProductMedia::image(
                    "https://images.unsplash.com/photo-1581783898377-1c85bf937427?auto=format&fit=crop&q=80&w=800",
                ),
                ProductMedia::image(
                    "https://images.unsplash.com/photo-1612117180556-34070a25287e?auto=format&fit=crop&q=80&w=800",
                ),
            ],
            primary_index: 0,
            rating: 4.8,
            reviews_count: 12,
            stock: 5,
            is_flash_sale: true,
            variations: vec![
                NewVariation::new("Transparent", 5).into_variation("v1"),
                NewVariation::new("Smoky Grey", 2)
                    .with_price(1700_00)
                    .into_variation("v2"),
            ],
            reviews: Vec::new(),
            created_at: now,
        },
        Product {
            id: "2".to_string(),
            name: "Custom Wooden Photo Frame".to_string(),
            price_cents: 850_00,
            old_price_cents: None,
            description: "Engrave your special date or message on this premium oak wood photo \
                          frame."
                .to_string(),
            category: Category::Personalized,
            media: vec![ProductMedia::image(
                "https://images.unsplash.com/photo-1531233076846-930430d4737f?auto=format&fit=crop&q=80&w=800",
            )],
            primary_index: 0,
            rating: 4.9,
            reviews_count: 24,
            stock: 15,
            is_flash_sale: false,
            variations: Vec::new(),
            reviews: Vec::new(),
            created_at: now - Duration::seconds(100),
        },
        Product {
            id: "3".to_string(),
            name: "Motion Art Lava Lamp".to_string(),
            price_cents: 2200_00,
            old_price_cents: Some(2500_00),
            description: "A soothing motion art lamp for your bedside table. Perfect for \
                          creating a relaxing atmosphere."
                .to_string(),
            category: Category::HomeDecor,
            media: vec![
                ProductMedia::video(
                    "https://assets.mixkit.co/videos/preview/mixkit-lava-lamp-close-up-1658-large.mp4",
                ),
                ProductMedia::image(
                    "https://images.unsplash.com/photo-1574632510257-2e2930263628?auto=format&fit=crop&q=80&w=800",
                ),
            ],
            primary_index: 0,
            rating: 4.7,
            reviews_count: 8,
            stock: 3,
            is_flash_sale: true,
            variations: Vec::new(),
            reviews: Vec::new(),
            created_at: now - Duration::seconds(200),
        },
    ]
}
