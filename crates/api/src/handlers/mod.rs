//! Request handlers, one module per resource.
//!
//! Handlers validate input with `auditdesk_core`, delegate to the matching
//! repository in `auditdesk_db`, and map errors via [`crate::error::AppError`].

pub mod dashboard;
pub mod engagement;
pub mod export;
pub mod finding;
pub mod kra;
pub mod notification;
pub mod org_unit;
pub mod psap;
pub mod recommendation;
pub mod risk;
