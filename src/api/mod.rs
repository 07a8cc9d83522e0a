//! Client for the MCQ service REST API (`/api/v1`).

mod client;
mod error;
pub mod models;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use models::*;
