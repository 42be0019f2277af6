//! A known-good plan: King's Cross Station to London Bridge.
//!
//! Served to callers who want to see what a plan looks like before asking
//! for one, and used as the reference fixture in tests.
use crate::PlanResponse;

/// The bundled plan as raw JSON text.
pub const EXAMPLE_PLAN_JSON: &str = include_str!("../data/example_plan.json");

/// Deserialize [`EXAMPLE_PLAN_JSON`].
pub fn example_plan() -> serde_json::Result<PlanResponse> {
    serde_json::from_str(EXAMPLE_PLAN_JSON)
}
