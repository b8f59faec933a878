//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! View rows (`v_*`) are read-only and have no DTOs.

pub mod action_plan;
pub mod engagement;
pub mod finding;
pub mod kra;
pub mod notification;
pub mod org_unit;
pub mod person;
pub mod psap;
pub mod recommendation;
pub mod risk;
