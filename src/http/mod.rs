//! Single-shot HTTP request helper shared by every release operation.

mod client;
mod error;

pub use client::{ApiRequest, ApiResponse, HttpClient, OAUTH_BASIC_PASSWORD};
pub use error::SendError;
