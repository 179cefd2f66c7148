//! # Onboarding Configuration
//!
//! The step catalog size and the step-advance policy, injected into the
//! progress engine at construction time.

use crate::primitives::{DEFAULT_TOTAL_STEPS, INITIAL_STEP, MAX_TOTAL_STEPS};
use crate::{OnboardError, StepId};
use serde::{Deserialize, Serialize};

/// How `current_step` moves when a step is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancePolicy {
    /// `current_step = step + 1`, even when `step` is out of sequence.
    ///
    /// Completing step 5 and then step 2 leaves the pointer at 3.
    #[default]
    Permissive,
    /// `current_step = max(current_step, step + 1)`; the pointer never moves back.
    Monotonic,
}

/// Catalog-wide onboarding settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Number of steps in the catalog. Steps are `1..=total_steps`.
    pub total_steps: StepId,
    /// Pointer movement on completion.
    pub advance: AdvancePolicy,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            total_steps: DEFAULT_TOTAL_STEPS,
            advance: AdvancePolicy::default(),
        }
    }
}

impl OnboardingConfig {
    /// Config with a custom step count and the default advance policy.
    #[must_use]
    pub fn with_total_steps(total_steps: StepId) -> Self {
        Self {
            total_steps,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_advance(mut self, advance: AdvancePolicy) -> Self {
        self.advance = advance;
        self
    }

    /// Reject step counts the engine cannot represent.
    pub fn validate(&self) -> Result<(), OnboardError> {
        if self.total_steps == 0 || self.total_steps > MAX_TOTAL_STEPS {
            return Err(OnboardError::InvalidInput(format!(
                "total_steps must be within 1..={}, got {}",
                MAX_TOTAL_STEPS, self.total_steps
            )));
        }
        Ok(())
    }

    /// Whether `step` names a step of the catalog.
    #[must_use]
    pub fn contains_step(&self, step: StepId) -> bool {
        (INITIAL_STEP..=self.total_steps).contains(&step)
    }
}
