pub mod client;
pub mod error;
pub mod query;
pub mod search;

pub use client::create_client;
pub use error::ApiError;
pub use query::RecommendationQuery;
pub use search::{decode_phones, search_phones};
