use super::*;

use serde_json::json;

// -----------------------------------------------------------------------
// normalize_barcodelookup
// -----------------------------------------------------------------------

fn barcodelookup_payload() -> serde_json::Value {
    json!({
        "barcode_number": "049000050103",
        "title": "Coca-Cola Classic",
        "manufacturer": "The Coca-Cola Company",
        "category": "Food, Beverages & Tobacco",
        "description": "12 fl oz can",
        "images": ["https://images.barcodelookup.com/49000050103.jpg"],
        "lowest_recorded_price": "0.99",
        "highest_recorded_price": 2.49,
        "currency": "USD",
        "color": "red",
        "stores": [
            {
                "store_name": "Walmart",
                "store_price": "1.28",
                "product_url": "https://walmart.example.com/coke"
            }
        ]
    })
}

#[test]
fn barcodelookup_maps_barcode_number_to_upc() {
    let product = normalize_barcodelookup(&barcodelookup_payload());
    assert_eq!(product.upc, "049000050103");
}

#[test]
fn barcodelookup_falls_back_to_manufacturer_for_brand() {
    let product = normalize_barcodelookup(&barcodelookup_payload());
    assert_eq!(product.brand, "The Coca-Cola Company");
}

#[test]
fn barcodelookup_parses_string_and_numeric_prices() {
    let product = normalize_barcodelookup(&barcodelookup_payload());
    assert_eq!(product.price.lowest, Some(0.99));
    assert_eq!(product.price.highest, Some(2.49));
}

#[test]
fn barcodelookup_maps_stores_to_offers() {
    let product = normalize_barcodelookup(&barcodelookup_payload());
    assert_eq!(product.offers.len(), 1);
    assert_eq!(product.offers[0].store, "Walmart");
    assert_eq!(product.offers[0].price, Some(1.28));
    assert_eq!(product.offers[0].link, "https://walmart.example.com/coke");
}

#[test]
fn barcodelookup_missing_title_becomes_unknown_product() {
    let product = normalize_barcodelookup(&json!({ "barcode_number": "123" }));
    assert_eq!(product.title, "Unknown Product");
}

#[test]
fn barcodelookup_prefers_product_name_over_fallback() {
    let product = normalize_barcodelookup(&json!({ "product_name": "Named Product" }));
    assert_eq!(product.title, "Named Product");
}

// -----------------------------------------------------------------------
// normalize_upcitemdb
// -----------------------------------------------------------------------

fn upcitemdb_item() -> serde_json::Value {
    json!({
        "title": "Apple iPhone Lightning Cable",
        "brand": "Apple",
        "model": "MD818ZM/A",
        "upc": "885909627066",
        "ean": "0885909627066",
        "category": "Electronics > Cables",
        "images": ["https://images.example.com/cable.jpg"],
        "lowest_recorded_price": 4.99,
        "highest_recorded_price": 19.99,
        "offers": [
            { "merchant": "Best Buy", "price": 18.99, "link": "https://bestbuy.example.com/cable" },
            { "merchant": "eBay", "price": "5.49", "link": "https://ebay.example.com/cable" }
        ]
    })
}

#[test]
fn upcitemdb_maps_core_fields() {
    let product = normalize_upcitemdb(&upcitemdb_item());
    assert_eq!(product.title, "Apple iPhone Lightning Cable");
    assert_eq!(product.brand, "Apple");
    assert_eq!(product.upc, "885909627066");
    assert_eq!(product.ean, "0885909627066");
    assert_eq!(product.details.model, "MD818ZM/A");
}

#[test]
fn upcitemdb_falls_back_to_ean_for_upc() {
    let product = normalize_upcitemdb(&json!({ "title": "x", "ean": "0123456789012" }));
    assert_eq!(product.upc, "0123456789012");
}

#[test]
fn upcitemdb_maps_offers_with_mixed_price_types() {
    let product = normalize_upcitemdb(&upcitemdb_item());
    assert_eq!(product.offers.len(), 2);
    assert_eq!(product.offers[0].store, "Best Buy");
    assert_eq!(product.offers[0].price, Some(18.99));
    assert_eq!(product.offers[1].price, Some(5.49));
}

#[test]
fn upcitemdb_absent_fields_default_to_empty() {
    let product = normalize_upcitemdb(&json!({ "title": "Bare" }));
    assert!(product.brand.is_empty());
    assert!(product.images.is_empty());
    assert!(product.offers.is_empty());
    assert!(product.price.is_empty());
    assert_eq!(product.price.currency, "USD");
}

// -----------------------------------------------------------------------
// normalize_upcdatabase
// -----------------------------------------------------------------------

#[test]
fn upcdatabase_title_falls_back_to_description() {
    let product = normalize_upcdatabase(&json!({
        "valid": true,
        "description": "Classic Coke 12oz",
        "upc": "0000049000050"
    }));
    assert_eq!(product.title, "Classic Coke 12oz");
}

#[test]
fn upcdatabase_has_no_price_data() {
    let product = normalize_upcdatabase(&json!({
        "title": "Something",
        "lowest_recorded_price": 9.99
    }));
    assert!(product.price.is_empty(), "provider carries no price data");
}

// -----------------------------------------------------------------------
// shared properties
// -----------------------------------------------------------------------

#[test]
fn normalization_is_idempotent_per_payload() {
    let raw = upcitemdb_item();
    assert_eq!(normalize_upcitemdb(&raw), normalize_upcitemdb(&raw));

    let raw = barcodelookup_payload();
    assert_eq!(normalize_barcodelookup(&raw), normalize_barcodelookup(&raw));
}

#[test]
fn non_numeric_price_strings_are_dropped() {
    let product = normalize_upcitemdb(&json!({
        "title": "x",
        "lowest_recorded_price": "call for price"
    }));
    assert_eq!(product.price.lowest, None);
}
