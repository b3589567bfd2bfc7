//! HTTP networking module
//!
//! Provides HTTP client functionality for making requests to the catalog service.

mod client;
mod user_agent;

pub use client::{ApiRequest, ApiResponse, HttpClient};
pub use user_agent::generate_user_agent;
