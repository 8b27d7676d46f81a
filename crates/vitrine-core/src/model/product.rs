// ── Product domain types ──
//
// The canonical catalog entry. Identity is a stable integer assigned by the
// product source; everything else is descriptive data.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── ProductId ───────────────────────────────────────────────────────

/// Stable identifier of a catalog product, unique within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ── Rating ──────────────────────────────────────────────────────────

/// Aggregate review score: average `rate` on a 0–5 scale and review `count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

impl Rating {
    /// Stand-in for products without a rating.
    pub const ZERO: Self = Self { rate: 0.0, count: 0 };

    /// Number of filled stars out of five, rounded to the nearest star.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    pub fn filled_stars(&self) -> u8 {
        // Clamped to 0..=5 first, so the cast cannot truncate.
        self.rate.clamp(0.0, 5.0).round() as u8
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::ZERO
    }
}

// ── Product ─────────────────────────────────────────────────────────

/// The canonical Product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Non-negative, validated on conversion.
    pub price: f64,
    /// Display asset reference; not validated.
    pub image: String,
    pub rating: Option<Rating>,
}

impl Product {
    /// Average rating, `0.0` when the product has none.
    pub fn rate(&self) -> f64 {
        self.rating.map_or(0.0, |r| r.rate)
    }

    /// Review count, `0` when the product has no rating.
    pub fn review_count(&self) -> u64 {
        self.rating.map_or(0, |r| r.count)
    }

    pub fn rating_or_default(&self) -> Rating {
        self.rating.unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(rating: Option<Rating>) -> Product {
        Product {
            id: ProductId::new(7),
            title: "Solid Gold Petite Micropave".into(),
            description: "Satisfaction guaranteed.".into(),
            category: "jewelery".into(),
            price: 168.0,
            image: String::new(),
            rating,
        }
    }

    #[test]
    fn missing_rating_reads_as_zero() {
        let p = product(None);
        assert!(p.rate().abs() < f64::EPSILON);
        assert_eq!(p.review_count(), 0);
        assert_eq!(p.rating_or_default(), Rating::ZERO);
    }

    #[test]
    fn present_rating_is_exposed() {
        let p = product(Some(Rating {
            rate: 3.9,
            count: 70,
        }));
        assert!((p.rate() - 3.9).abs() < f64::EPSILON);
        assert_eq!(p.review_count(), 70);
    }

    #[test]
    fn filled_stars_round_to_nearest() {
        let stars = |rate| Rating { rate, count: 1 }.filled_stars();
        assert_eq!(stars(0.0), 0);
        assert_eq!(stars(2.4), 2);
        assert_eq!(stars(2.5), 3);
        assert_eq!(stars(4.7), 5);
        assert_eq!(stars(9.0), 5);
    }

    #[test]
    fn product_id_parses_and_displays() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("forty-two".parse::<ProductId>().is_err());
    }

    #[test]
    fn product_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ProductId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
