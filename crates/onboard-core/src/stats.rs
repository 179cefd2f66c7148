//! # Statistics Aggregator
//!
//! Population-level onboarding metrics for administrators.
//!
//! Only records with [`Role::Employee`] are counted. The aggregator reads the
//! stored `progress` and `status` fields; it never recomputes them, so it does
//! not need the step catalog.
//!
//! ## Distribution Buckets
//!
//! | Bucket | Progress range |
//! |--------|----------------|
//! | `0-25%` | `[0, 25]` |
//! | `26-50%` | `(25, 50]` |
//! | `51-75%` | `(50, 75]` |
//! | `76-100%` | `(75, 100]` |

use crate::{EmployeeRecord, Role, Status};
use serde::{Deserialize, Serialize};

/// Upper (inclusive) bounds of the first three buckets.
pub const BUCKET_BOUNDS: [u8; 3] = [25, 50, 75];

/// Labels of the four buckets, in order.
pub const BUCKET_LABELS: [&str; 4] = ["0-25%", "26-50%", "51-75%", "76-100%"];

// =============================================================================
// PROGRESS DISTRIBUTION
// =============================================================================

/// Employee counts per progress bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressDistribution {
    pub quarter: usize,
    pub half: usize,
    pub three_quarters: usize,
    pub full: usize,
}

impl ProgressDistribution {
    /// Count one progress value into its bucket.
    pub fn record(&mut self, progress: u8) {
        let slot = match progress {
            p if p <= BUCKET_BOUNDS[0] => &mut self.quarter,
            p if p <= BUCKET_BOUNDS[1] => &mut self.half,
            p if p <= BUCKET_BOUNDS[2] => &mut self.three_quarters,
            _ => &mut self.full,
        };
        *slot = slot.saturating_add(1);
    }

    /// Sum over all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.quarter + self.half + self.three_quarters + self.full
    }

    /// `(label, count)` pairs in bucket order.
    #[must_use]
    pub fn buckets(&self) -> [(&'static str, usize); 4] {
        [
            (BUCKET_LABELS[0], self.quarter),
            (BUCKET_LABELS[1], self.half),
            (BUCKET_LABELS[2], self.three_quarters),
            (BUCKET_LABELS[3], self.full),
        ]
    }
}

// =============================================================================
// ONBOARDING STATS
// =============================================================================

/// Aggregate view over the employee population.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OnboardingStats {
    pub total_employees: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Rounded mean of stored progress values; 0 for an empty population.
    pub average_progress: u8,
    pub distribution: ProgressDistribution,
}

impl OnboardingStats {
    /// Employees that have not completed a single step.
    #[must_use]
    pub fn not_started(&self) -> usize {
        self.total_employees
            .saturating_sub(self.completed)
            .saturating_sub(self.in_progress)
    }
}

/// Computes [`OnboardingStats`] in a single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Aggregate over `records`. Order-independent and deterministic.
    #[must_use]
    pub fn compute<'a, I>(&self, records: I) -> OnboardingStats
    where
        I: IntoIterator<Item = &'a EmployeeRecord>,
    {
        let mut stats = OnboardingStats::default();
        let mut progress_sum: u64 = 0;

        for record in records.into_iter().filter(|r| r.role == Role::Employee) {
            stats.total_employees += 1;
            match record.status {
                Status::Completed => stats.completed += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::NotStarted => {}
            }
            progress_sum = progress_sum.saturating_add(record.progress as u64);
            stats.distribution.record(record.progress);
        }

        stats.average_progress = rounded_mean(progress_sum, stats.total_employees as u64);
        stats
    }
}

/// `round(sum / count)` half-up, 0 when `count == 0`.
fn rounded_mean(sum: u64, count: u64) -> u8 {
    sum.saturating_mul(2)
        .saturating_add(count)
        .checked_div(count.saturating_mul(2))
        .unwrap_or(0)
        .min(u8::MAX as u64) as u8
}

// =============================================================================
// TESTS
// =============================================================================
