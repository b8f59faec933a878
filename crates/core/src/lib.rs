//! Domain logic for the audit and governance tracker.
//!
//! This crate has no internal dependencies and performs no I/O. Every
//! derived figure shown on the dashboard (percentages, rating bands, risk
//! levels, trend points) is computed here so the API, the ops tooling, and
//! the database views never disagree on rounding.

pub mod audit;
pub mod error;
pub mod export;
pub mod kra;
pub mod psap;
pub mod risk;
pub mod schema;
pub mod seed;
pub mod trend;
pub mod types;
