//! Shared response envelope types for API handlers.
//!
//! List and aggregate responses use a `{ "data": ... }` envelope. Single
//! entities from CRUD endpoints are returned bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
