/// Client for the photo store's REST API
///
/// The server is the single source of truth for folder contents and
/// permissions. Every mutating request answers with a fresh authoritative
/// listing, which callers apply wholesale to local state.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
