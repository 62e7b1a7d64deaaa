use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::Category;
use crate::domain::product::{MediaKind, NewProduct, NewVariation, ProductMedia};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a description.
const DESCRIPTION_MAX_LEN: usize = 4096;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// A numeric field could not be parsed.
    #[error("invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    /// The provided category label is not one of the shop's categories.
    #[error("unknown category `{value}`")]
    InvalidCategory { value: String },
    /// A media entry carried an unknown kind label.
    #[error("unknown media kind `{value}`")]
    InvalidMediaKind { value: String },
    /// The gallery must hold at least one entry.
    #[error("at least one media entry is required")]
    MissingMedia,
    /// A media entry had no URL.
    #[error("media url cannot be empty")]
    EmptyMediaUrl,
    /// A variation entry had no name.
    #[error("variation name cannot be empty")]
    EmptyVariationName,
}

/// One gallery entry of the "Add product" form.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntryForm {
    pub url: String,
    /// `image` or `video`, case-insensitive.
    pub kind: String,
}

/// One variation row of the "Add product" form.
#[derive(Debug, Clone, Deserialize)]
pub struct VariationEntryForm {
    pub name: String,
    /// Optional price override as a decimal string, e.g. `1700` or `16.50`.
    pub price: Option<String>,
    /// Optional stock count; missing means none reserved.
    pub stock: Option<String>,
}

/// Form payload emitted when submitting the "Add product" form.
///
/// Prices and stock arrive as strings, mirroring the console's text
/// inputs; conversion parses them into smallest-unit integers.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Price in whole currency units, parsed as a decimal string.
    #[validate(length(min = 1))]
    pub price: String,
    /// Optional previous price for discount display.
    pub old_price: Option<String>,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: String,
    /// Optional category label; missing keeps the console default.
    pub category: Option<String>,
    /// Optional stock count; missing keeps the console default.
    pub stock: Option<String>,
    /// Gallery entries, at least one required.
    pub media: Vec<MediaEntryForm>,
    /// Variation rows, may be empty.
    pub variations: Vec<VariationEntryForm>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let description = sanitize_multiline_text(&self.description);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let price_cents = parse_price_cents("price", &self.price)?;

        if self.media.is_empty() {
            return Err(ProductFormError::MissingMedia);
        }

        let mut media = Vec::with_capacity(self.media.len());
        for entry in &self.media {
            let url = entry.url.trim();
            if url.is_empty() {
                return Err(ProductFormError::EmptyMediaUrl);
            }
            media.push(ProductMedia {
                url: url.to_string(),
                kind: parse_media_kind(&entry.kind)?,
            });
        }

        let mut new_product = NewProduct::new(name, price_cents, description).with_media(media);

        if let Some(value) = trimmed_value(self.old_price.as_deref()) {
            new_product = new_product.with_old_price(parse_price_cents("old price", value)?);
        }

        if let Some(value) = trimmed_value(self.category.as_deref()) {
            let category = value
                .parse::<Category>()
                .map_err(|err| ProductFormError::InvalidCategory { value: err.0 })?;
            new_product = new_product.with_category(category);
        }

        if let Some(value) = trimmed_value(self.stock.as_deref()) {
            new_product = new_product.with_stock(parse_stock("stock", value)?);
        }

        if !self.variations.is_empty() {
            let mut variations = Vec::with_capacity(self.variations.len());
            for entry in self.variations {
                variations.push(entry.into_new_variation()?);
            }
            new_product = new_product.with_variations(variations);
        }

        Ok(new_product)
    }
}

impl VariationEntryForm {
    fn into_new_variation(self) -> ProductFormResult<NewVariation> {
        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyVariationName);
        }

        let stock = match trimmed_value(self.stock.as_deref()) {
            Some(value) => parse_stock("variation stock", value)?,
            None => 0,
        };

        let mut variation = NewVariation::new(name, stock);

        if let Some(value) = trimmed_value(self.price.as_deref()) {
            variation = variation.with_price(parse_price_cents("variation price", value)?);
        }

        Ok(variation)
    }
}

/// Trims an optional field, treating blank strings as absent.
fn trimmed_value(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses a decimal currency string into the smallest currency unit.
fn parse_price_cents(field: &'static str, value: &str) -> ProductFormResult<i64> {
    let invalid = || ProductFormError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    let parsed: f64 = value.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(invalid());
    }

    Ok((parsed * 100.0).round() as i64)
}

fn parse_stock(field: &'static str, value: &str) -> ProductFormResult<i64> {
    value
        .parse::<i64>()
        .ok()
        .filter(|stock| *stock >= 0)
        .ok_or(ProductFormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_media_kind(value: &str) -> ProductFormResult<MediaKind> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("image") {
        Ok(MediaKind::Image)
    } else if trimmed.eq_ignore_ascii_case("video") {
        Ok(MediaKind::Video)
    } else {
        Err(ProductFormError::InvalidMediaKind {
            value: trimmed.to_string(),
        })
    }
}
