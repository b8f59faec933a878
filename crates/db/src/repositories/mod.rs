//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_plan_repo;
pub mod engagement_repo;
pub mod finding_repo;
pub mod kra_repo;
pub mod notification_repo;
pub mod org_unit_repo;
pub mod person_repo;
pub mod psap_repo;
pub mod recommendation_repo;
pub mod risk_event_repo;
pub mod risk_profile_repo;
pub mod schema_repo;

pub use action_plan_repo::ActionPlanRepo;
pub use engagement_repo::EngagementRepo;
pub use finding_repo::FindingRepo;
pub use kra_repo::KraRepo;
pub use notification_repo::NotificationRepo;
pub use org_unit_repo::OrgUnitRepo;
pub use person_repo::PersonRepo;
pub use psap_repo::PsapRepo;
pub use recommendation_repo::RecommendationRepo;
pub use risk_event_repo::RiskEventRepo;
pub use risk_profile_repo::RiskProfileRepo;
pub use schema_repo::SchemaRepo;
