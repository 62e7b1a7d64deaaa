use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of catalog categories a product can belong to.
///
/// The storefront's "All" filter is not a category of its own; queries
/// model it as `Option<Category>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Personalized,
    Birthday,
    Wedding,
    #[serde(rename = "Home Decor")]
    HomeDecor,
    Accessories,
}

impl Category {
    /// Every category, in the order the storefront lists them.
    pub const ALL: [Category; 5] = [
        Category::Personalized,
        Category::Birthday,
        Category::Wedding,
        Category::HomeDecor,
        Category::Accessories,
    ];

    /// Display label, identical to the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personalized => "Personalized",
            Category::Birthday => "Birthday",
            Category::Wedding => "Wedding",
            Category::HomeDecor => "Home Decor",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}
