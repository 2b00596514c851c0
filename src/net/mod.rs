//! REST client, wire types, and the uniform result type for remote calls.

pub mod api;
pub mod error;
pub mod types;

pub use api::ApiClient;
pub use error::{ApiError, ApiResult};
