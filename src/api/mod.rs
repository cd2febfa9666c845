//! Analysis Backend API
//!
//! HTTP client for the local pharmacogenomic analysis service and the
//! normalization of its error messages into user-facing text.

pub mod client;
pub mod normalize;

pub use client::{ApiClient, ApiError};
pub use normalize::normalize_error_message;
