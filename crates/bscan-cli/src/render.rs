//! Terminal rendering for lookup outcomes.
//!
//! `NotFound` and `Failed` print as informational lines, never as process
//! errors — rescanning (or re-running) is the retry mechanism.

use bscan_core::{LookupFailure, LookupResult, NormalizedProduct};

pub fn render_lookup(result: &LookupResult) {
    match result {
        LookupResult::Found { product, .. } => render_product(product),
        LookupResult::NotFound { reason } => println!("No match: {reason}"),
        LookupResult::Failed(failure) => render_failure(failure),
    }
}

pub fn render_failure(failure: &LookupFailure) {
    println!("Lookup failed ({failure})");
}

pub fn render_search(query: &str, products: &[NormalizedProduct]) {
    if products.is_empty() {
        println!("No products matched \"{query}\"");
        return;
    }
    println!("{} product(s) for \"{query}\":", products.len());
    for product in products {
        if product.brand.is_empty() {
            println!("  - {}", product.title);
        } else {
            println!("  - {} ({})", product.title, product.brand);
        }
    }
}

pub fn render_product(product: &NormalizedProduct) {
    println!("{}", product.title);
    if !product.brand.is_empty() {
        println!("  Brand:       {}", product.brand);
    }
    if !product.category.is_empty() {
        println!("  Category:    {}", product.category);
    }
    if !product.description.is_empty() {
        println!("  Description: {}", product.description);
    }
    if !product.upc.is_empty() {
        println!("  UPC/EAN:     {}", product.upc);
    }
    if !product.details.model.is_empty() {
        println!("  Model:       {}", product.details.model);
    }
    if !product.details.color.is_empty() {
        println!("  Color:       {}", product.details.color);
    }
    if !product.details.size.is_empty() {
        println!("  Size:        {}", product.details.size);
    }
    if !product.details.weight.is_empty() {
        println!("  Weight:      {}", product.details.weight);
    }
    if !product.price.is_empty() {
        let currency = &product.price.currency;
        if let Some(lowest) = product.price.lowest {
            println!("  Lowest:      {currency} {lowest:.2}");
        }
        if let Some(highest) = product.price.highest {
            println!("  Highest:     {currency} {highest:.2}");
        }
    }
    if let Some(image) = product.primary_image() {
        println!("  Image:       {image}");
    }
    if !product.offers.is_empty() {
        println!("  Available at {} store(s)", product.offers.len());
    }
}
