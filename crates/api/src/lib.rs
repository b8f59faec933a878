//! Audit and governance tracker API server library.
//!
//! Exposes config, state, error handling, and the router so integration
//! tests and the binary entrypoint share one middleware stack.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
