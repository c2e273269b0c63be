//! Raw provider payload → [`NormalizedProduct`] mapping.
//!
//! Each provider names the same facts differently (`barcode_number` vs
//! `upc` vs `ean`, `stores` vs `offers`); these functions flatten those
//! dialects onto the one shape the rest of the system consumes. Mapping is
//! pure: the same raw payload always yields a structurally equal product.

use serde_json::Value;

use bscan_core::product::UNKNOWN_TITLE;
use bscan_core::{NormalizedProduct, PriceRange, ProductDetails, StoreOffer};

/// Maps a BarcodeLookup.com product object.
#[must_use]
pub fn normalize_barcodelookup(raw: &Value) -> NormalizedProduct {
    NormalizedProduct {
        title: title_from(raw, &["title", "product_name"]),
        brand: text_or(raw, &["brand", "manufacturer"]),
        description: text(raw, "description"),
        category: text(raw, "category"),
        upc: text_or(raw, &["barcode_number", "upc"]),
        ean: text(raw, "ean"),
        images: strings(raw, "images"),
        price: PriceRange {
            lowest: number(raw, "lowest_recorded_price"),
            highest: number(raw, "highest_recorded_price"),
            currency: currency(raw),
        },
        details: details(raw),
        offers: offers(raw, "stores", "store_name", "store_price", "product_url"),
    }
}

/// Maps a UPCItemDB item object (the first entry of `items`).
#[must_use]
pub fn normalize_upcitemdb(raw: &Value) -> NormalizedProduct {
    NormalizedProduct {
        title: title_from(raw, &["title"]),
        brand: text(raw, "brand"),
        description: text(raw, "description"),
        category: text(raw, "category"),
        upc: text_or(raw, &["upc", "ean"]),
        ean: text(raw, "ean"),
        images: strings(raw, "images"),
        price: PriceRange {
            lowest: number(raw, "lowest_recorded_price"),
            highest: number(raw, "highest_recorded_price"),
            currency: currency(raw),
        },
        details: details(raw),
        offers: offers(raw, "offers", "merchant", "price", "link"),
    }
}

/// Maps a UPCDatabase.org response body (the product is the body itself).
///
/// This provider has no price or offer data; `title` falls back to the
/// description before giving up.
#[must_use]
pub fn normalize_upcdatabase(raw: &Value) -> NormalizedProduct {
    NormalizedProduct {
        title: title_from(raw, &["title", "description"]),
        brand: text(raw, "brand"),
        description: text(raw, "description"),
        category: text(raw, "category"),
        upc: text_or(raw, &["upc", "ean"]),
        ean: text(raw, "ean"),
        images: strings(raw, "images"),
        price: PriceRange::default(),
        details: details(raw),
        offers: Vec::new(),
    }
}

fn title_from(raw: &Value, keys: &[&str]) -> String {
    let title = text_or(raw, keys);
    if title.is_empty() {
        UNKNOWN_TITLE.to_owned()
    } else {
        title
    }
}

/// Returns the string at `key`, or `""` when absent or not a string.
fn text(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Returns the first non-empty string among `keys`.
fn text_or(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(raw, key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Reads a price-like field that providers send as either a JSON number or
/// a numeric string.
fn number(raw: &Value, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strings(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn currency(raw: &Value) -> String {
    let value = text(raw, "currency");
    if value.is_empty() {
        "USD".to_owned()
    } else {
        value
    }
}

fn details(raw: &Value) -> ProductDetails {
    ProductDetails {
        color: text(raw, "color"),
        size: text(raw, "size"),
        weight: text(raw, "weight"),
        dimension: text(raw, "dimension"),
        model: text(raw, "model"),
    }
}

fn offers(
    raw: &Value,
    key: &str,
    store_key: &str,
    price_key: &str,
    link_key: &str,
) -> Vec<StoreOffer> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| StoreOffer {
                    store: text(item, store_key),
                    price: number(item, price_key),
                    link: text(item, link_key),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
