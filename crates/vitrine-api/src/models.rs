// Wire types for the catalog endpoint.
//
// These mirror the JSON the endpoint returns, field for field. Optional
// text fields are `Option` so that both a missing key and an explicit
// `null` deserialize cleanly; `vitrine-core` fills the defaults.

use serde::{Deserialize, Serialize};

/// One product as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingRecord>,
}

/// Aggregate review score attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_rating_is_none() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99
        }))
        .unwrap();
        assert!(record.rating.is_none());
        assert!(record.description.is_none());
    }

    #[test]
    fn null_fields_are_tolerated() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 4,
            "title": "Mens Casual Slim Fit",
            "price": 15.99,
            "description": null,
            "category": null,
            "image": null,
            "rating": null
        }))
        .unwrap();
        assert!(record.rating.is_none());
        assert!(record.category.is_none());
    }

    #[test]
    fn rating_parses_rate_and_count() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "category": "men's clothing",
            "rating": { "rate": 3.9, "count": 120 }
        }))
        .unwrap();
        let rating = record.rating.unwrap();
        assert!((rating.rate - 3.9).abs() < f64::EPSILON);
        assert_eq!(rating.count, 120);
    }

    #[test]
    fn missing_title_is_rejected() {
        let result: Result<ProductRecord, _> =
            serde_json::from_value(json!({ "id": 1, "price": 1.0 }));
        assert!(result.is_err());
    }
}
