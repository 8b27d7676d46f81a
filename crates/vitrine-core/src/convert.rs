// ── API-to-domain type conversions ──
//
// Bridges raw `vitrine_api` records into canonical `Product`s. Missing
// optional text becomes an empty string and a missing rating stays `None`
// (read as rate 0 / count 0). Records that break the model's invariants
// reject the whole payload.

use std::collections::HashSet;

use vitrine_api::{ProductRecord, RatingRecord};

use crate::error::FetchError;
use crate::model::{Product, ProductId, Rating};

impl From<RatingRecord> for Rating {
    fn from(r: RatingRecord) -> Self {
        Self {
            rate: r.rate,
            count: r.count,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Self {
            id: ProductId::new(r.id),
            title: r.title,
            description: r.description.unwrap_or_default(),
            category: r.category.unwrap_or_default(),
            price: r.price,
            image: r.image.unwrap_or_default(),
            rating: r.rating.map(Rating::from),
        }
    }
}

/// Convert a full payload, enforcing the snapshot invariants.
///
/// Rejects negative or non-finite prices, rates outside `0..=5`, and
/// duplicate ids.
pub fn products_from_records(records: Vec<ProductRecord>) -> Result<Vec<Product>, FetchError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());

    for record in records {
        let product = Product::from(record);
        validate(&product)?;
        if !seen.insert(product.id) {
            return Err(FetchError::payload(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        products.push(product);
    }

    Ok(products)
}

fn validate(product: &Product) -> Result<(), FetchError> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(FetchError::payload(format!(
            "product {} has invalid price {}",
            product.id, product.price
        )));
    }
    if let Some(rating) = product.rating {
        if !rating.rate.is_finite() || !(0.0..=5.0).contains(&rating.rate) {
            return Err(FetchError::payload(format!(
                "product {} has out-of-range rating {}",
                product.id, rating.rate
            )));
        }
    }
    Ok(())
}
