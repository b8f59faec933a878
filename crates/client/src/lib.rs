//! HTTP client for the audit and governance tracker API.
//!
//! [`ApiClient`] wraps the REST endpoints. [`Collection`] holds a loaded
//! list of one resource and applies loads and mutations explicitly.

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod resource;

pub use api::ApiClient;
pub use collection::Collection;
pub use config::ClientConfig;
pub use error::ClientError;
pub use resource::{HttpResource, Keyed, ResourceBackend};
