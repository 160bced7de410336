pub mod client;
pub mod error;
pub mod payload;
pub mod retry;
pub mod shape;

pub use client::{ApiClient, ClientOptions};
pub use error::FetchError;
pub use payload::extract_in_stock_value;
pub use retry::RetryPolicy;
pub use shape::{decode_records, DecodeFailure, Resource, ResponseShape, ValidatedProduct};
