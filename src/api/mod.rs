pub mod client;
pub mod models;
pub mod users;

pub use client::{ApiClient, ApiError, Result};
pub use users::UserApiClient;
