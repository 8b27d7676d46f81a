// ── Domain model ──

pub mod product;

pub use product::{Product, ProductId, Rating};
