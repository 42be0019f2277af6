//! Business rules the structural schema cannot express.
use stepfree_core::preview::{PREVIEW_CHARS, preview};
use stepfree_types::{PlanResponse, REQUIRED_BACKUP_PLANS};

use crate::error::PipelineError;

/// Check a structurally valid plan. `raw` is the model text it came from.
///
/// # Errors
///
/// [`PipelineError::BusinessRule`] when the plan does not carry exactly
/// [`REQUIRED_BACKUP_PLANS`] backup plans.
pub fn enforce(plan: &PlanResponse, raw: &str) -> Result<(), PipelineError> {
    let actual = plan.backup_plans.len();
    if actual != REQUIRED_BACKUP_PLANS {
        return Err(PipelineError::BusinessRule {
            expected: REQUIRED_BACKUP_PLANS,
            actual,
            raw: preview(raw, PREVIEW_CHARS).into_owned(),
        });
    }
    Ok(())
}
