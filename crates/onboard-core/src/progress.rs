//! # Progress Engine
//!
//! Pure decision logic for the onboarding state machine.
//!
//! The engine mutates an in-memory [`EmployeeRecord`] and reports whether
//! anything changed. Persisting the change is the caller's job (see
//! [`Roster`](crate::Roster)), which issues exactly one write when
//! [`StepOutcome::changed`] is true and none otherwise.
//!
//! ## Transition on `complete_step(record, step)`
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | `step` already completed | nothing |
//! | otherwise | insert `step`, move `current_step` per [`AdvancePolicy`], recompute `progress`, status = In Progress |
//! | all steps completed afterwards | status = Completed |
//!
//! All arithmetic is integer-only; rounding is half-up, matching
//! `Math.round` for non-negative values.

use crate::config::{AdvancePolicy, OnboardingConfig};
use crate::primitives::{ACHIEVEMENT_LABEL, PLACEHOLDER_TIME_SPENT};
use crate::{EmployeeRecord, OnboardError, Status, StepId};
use serde::{Deserialize, Serialize};

/// `round(100 * completed / total)` with half-up rounding, capped at 100.
#[must_use]
pub fn percent(completed: usize, total: StepId) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u64;
    let total = total as u64;
    let rounded = completed
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .unwrap_or(0);
    rounded.min(100) as u8
}

// =============================================================================
// VIEWS
// =============================================================================

/// Observable progress of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub progress: u8,
    pub current_step: StepId,
    pub status: Status,
    /// Ascending step ids.
    pub completed_steps: Vec<StepId>,
}

impl ProgressView {
    /// Project the stored fields of a record. No recomputation.
    #[must_use]
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            progress: record.progress,
            current_step: record.current_step,
            status: record.status,
            completed_steps: record.completed_steps.iter().copied().collect(),
        }
    }
}

/// Result of applying one completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// View after the event.
    pub view: ProgressView,
    /// False when the step was already completed and nothing changed.
    pub changed: bool,
}

/// Data shown once onboarding is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub total_steps: StepId,
    pub time_spent: String,
    pub achievement: String,
}

// =============================================================================
// PROGRESS ENGINE
// =============================================================================

/// Applies step-completion events and derives read-only views.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressEngine {
    config: OnboardingConfig,
}

impl ProgressEngine {
    #[must_use]
    pub fn new(config: OnboardingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    #[must_use]
    pub fn total_steps(&self) -> StepId {
        self.config.total_steps
    }

    /// Mark `step` as completed on `record`.
    ///
    /// The step is not checked against the catalog here; callers that need
    /// range validation do it before calling.
    pub fn complete_step(&self, record: &mut EmployeeRecord, step: StepId) -> StepOutcome {
        if record.has_completed(step) {
            return StepOutcome {
                view: ProgressView::from_record(record),
                changed: false,
            };
        }

        record.completed_steps.insert(step);
        let next = step.saturating_add(1);
        record.current_step = match self.config.advance {
            AdvancePolicy::Permissive => next,
            AdvancePolicy::Monotonic => record.current_step.max(next),
        };
        record.progress = percent(record.completed_count(), self.config.total_steps);
        record.status = self.status_after_completion(record.completed_count());

        StepOutcome {
            view: ProgressView::from_record(record),
            changed: true,
        }
    }

    /// Current progress of a record. Pure projection.
    #[must_use]
    pub fn progress(&self, record: &EmployeeRecord) -> ProgressView {
        ProgressView::from_record(record)
    }

    /// Completion summary, available only once every step is done.
    pub fn completion_summary(
        &self,
        record: &EmployeeRecord,
    ) -> Result<CompletionSummary, OnboardError> {
        if record.status != Status::Completed {
            return Err(OnboardError::NotCompleted);
        }
        Ok(CompletionSummary {
            total_steps: self.config.total_steps,
            time_spent: PLACEHOLDER_TIME_SPENT.to_string(),
            achievement: ACHIEVEMENT_LABEL.to_string(),
        })
    }

    fn status_after_completion(&self, completed: usize) -> Status {
        if completed == self.config.total_steps as usize {
            Status::Completed
        } else {
            Status::InProgress
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
