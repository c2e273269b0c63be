//! Provider-agnostic product record produced by an adapter.
//!
//! Every field defaults to an empty value so absent upstream data never
//! surfaces as nulls in a rendering layer. A `NormalizedProduct` is built
//! once from a raw provider payload and never mutated afterward.

use serde::{Deserialize, Serialize};

/// Title used when the upstream payload carries none.
pub const UNKNOWN_TITLE: &str = "Unknown Product";

/// Provider-agnostic product shape shared by all adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Never empty; falls back to [`UNKNOWN_TITLE`].
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub upc: String,
    #[serde(default)]
    pub ean: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: PriceRange,
    #[serde(default)]
    pub details: ProductDetails,
    #[serde(default)]
    pub offers: Vec<StoreOffer>,
}

impl Default for NormalizedProduct {
    fn default() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_owned(),
            brand: String::new(),
            description: String::new(),
            category: String::new(),
            upc: String::new(),
            ean: String::new(),
            images: Vec::new(),
            price: PriceRange::default(),
            details: ProductDetails::default(),
            offers: Vec::new(),
        }
    }
}

impl NormalizedProduct {
    /// Returns the first image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Recorded price range for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lowest: Option<f64>,
    pub highest: Option<f64>,
    pub currency: String,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            lowest: None,
            highest: None,
            currency: "USD".to_owned(),
        }
    }
}

impl PriceRange {
    /// Returns `true` when neither bound is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lowest.is_none() && self.highest.is_none()
    }
}

/// Physical attributes, present only for some providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub model: String,
}

/// A store listing attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreOffer {
    #[serde(default)]
    pub store: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub link: String,
}
