//! Domain types of the Step Free planner.
//!
//! * [`request`] – the inbound [`PlanRequest`] and its validator.
//! * [`plan`] – the [`PlanResponse`] data model. Its derived JSON Schema is
//!   the single source of truth for the output contract.
//! * [`contract`] – renders that schema as prose for the system prompt.
//! * [`fragments`] / [`prompt`] – the prompt composer.
//! * [`example`] – a bundled, known-good plan.
pub mod contract;
pub mod example;
pub mod fragments;
pub mod plan;
pub mod prompt;
pub mod request;
pub mod violation;

pub use plan::{BackupPlan, PlanResponse, PrimaryPlan, REQUIRED_BACKUP_PLANS, Step};
pub use request::PlanRequest;
pub use violation::FieldViolation;
