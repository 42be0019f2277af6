//! The journey plan data model.
//!
//! The `schemars` attributes below are the contract: [`plan_response_schema`]
//! derives the canonical JSON Schema from them, the system prompt renders it
//! (see [`crate::contract`]), the pipeline validates responses against it and
//! the provider adapter relaxes it into its structured-output declaration.
//!
//! The one rule the schema does not carry is the exact backup plan count.
//! Provider schema mechanisms can only express `minItems` of 0 or 1, so the
//! schema says "at least one" and [`REQUIRED_BACKUP_PLANS`] is enforced as a
//! separate business rule.
use std::fmt;

use schemars::JsonSchema;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected, Visitor},
};
use serde_json::Value;
use stepfree_core::schema_util::derive_response_schema;

/// Every plan carries exactly this many alternatives.
pub const REQUIRED_BACKUP_PLANS: usize = 2;

/// One atomic instruction within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    /// Short imperative heading.
    #[schemars(length(min = 1))]
    pub title: String,
    /// What to do, in full sentences.
    #[schemars(length(min = 1))]
    pub description: String,
    /// Lifts, ramps, step-free access, boarding assistance.
    pub accessibility_notes: Vec<String>,
    /// Duration of the step in whole minutes.
    #[serde(deserialize_with = "whole_minutes")]
    pub estimated_time_mins: u32,
    /// Minutes of walking within the step.
    #[serde(deserialize_with = "whole_minutes")]
    pub walking_mins: u32,
    /// Noise, lighting, crowding and other sensory load.
    pub sensory_notes: Vec<String>,
    /// What could go wrong on this step.
    pub risk_flags: Vec<String>,
}

/// The recommended route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PrimaryPlan {
    #[schemars(length(min = 1))]
    pub title: String,
    #[schemars(length(min = 1))]
    pub steps: Vec<Step>,
}

/// An alternative route and when to switch to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BackupPlan {
    #[schemars(length(min = 1))]
    pub name: String,
    /// When to use this plan instead of the primary one.
    #[schemars(length(min = 1))]
    pub reason: String,
    #[schemars(length(min = 1))]
    pub steps: Vec<Step>,
}

/// A complete, validated journey plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanResponse {
    /// Overview of the recommended route.
    #[schemars(length(min = 1))]
    pub summary: String,
    /// What the plan takes for granted about the traveller and the network.
    pub assumptions: Vec<String>,
    /// How confident the plan is, 0 (guess) to 100 (certain).
    #[schemars(range(min = 0, max = 100))]
    pub confidence_score: f64,
    /// Why the score is what it is.
    #[schemars(length(min = 1))]
    pub confidence_rationale: String,
    pub primary_plan: PrimaryPlan,
    /// Alternatives to the primary plan.
    #[schemars(length(min = 1))]
    pub backup_plans: Vec<BackupPlan>,
    /// Lines a member of staff can say, one spoken line per entry.
    #[schemars(length(min = 1))]
    pub staff_script: Vec<String>,
    /// Things to check before setting off.
    #[schemars(length(min = 1))]
    pub before_you_leave_checklist: Vec<String>,
    /// Journey-wide risks.
    pub risk_flags: Vec<String>,
}

/// Accepts `5` and `5.0` alike. JSON Schema calls both an integer.
fn whole_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeMinutes;

    impl Visitor<'_> for WholeMinutes {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number of minutes")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) {
                Ok(v as u32)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeMinutes)
}

/// Canonical JSON Schema of [`PlanResponse`].
pub fn plan_response_schema() -> Value {
    derive_response_schema::<PlanResponse>()
}
