//! Step guards.
//!
//! Conditions are free-form strings carried through from the workflow file.
//! There is no condition language: the default evaluator admits every step.

use crate::executor::StepOutcome;

/// What an evaluator can see when deciding whether a step runs.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    /// Zero-based index of the step being considered
    pub step_index: usize,
    /// Outcomes of the steps that already ran, in order
    pub completed: &'a [StepOutcome],
}

pub trait ConditionEvaluator: Send + Sync {
    fn evaluate(&self, condition: &str, ctx: &RunContext<'_>) -> bool;
}

/// Admits every step regardless of its condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveConditions;

impl ConditionEvaluator for PermissiveConditions {
    fn evaluate(&self, condition: &str, ctx: &RunContext<'_>) -> bool {
        tracing::debug!(
            "[Condition] step {}: '{}' -> true",
            ctx.step_index + 1,
            condition
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_admits_everything() {
        let ctx = RunContext {
            step_index: 0,
            completed: &[],
        };
        assert!(PermissiveConditions.evaluate("false", &ctx));
        assert!(PermissiveConditions.evaluate("", &ctx));
        assert!(PermissiveConditions.evaluate("refund_requested == true", &ctx));
    }
}
