// vitrine-api: Async Rust client for JSON product catalog endpoints

pub mod catalog;
pub mod error;
pub mod models;
pub mod transport;

pub use catalog::CatalogClient;
pub use error::Error;
pub use models::{ProductRecord, RatingRecord};
pub use transport::TransportConfig;
