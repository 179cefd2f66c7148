//! # Onboarding Scenario Tests
//!
//! End-to-end flows through the [`Roster`] facade.
//!
//! ## Tiers
//! - S0: Step completion
//! - S1: Idempotence and write discipline
//! - S2: Population statistics
//! - S3: Completion summary
//! - S4: Persistence

use onboard_core::{
    AdvancePolicy, EmployeeId, NewEmployee, OnboardError, OnboardingConfig, Roster, Status,
};

fn roster() -> Roster {
    Roster::new(OnboardingConfig::default()).expect("roster")
}

fn enroll(roster: &mut Roster, name: &str) -> EmployeeId {
    let email = format!("{}@example.com", name.to_lowercase());
    roster
        .enroll(NewEmployee::employee(name, email, "password"))
        .expect("enroll")
        .id
}

fn complete_all(roster: &mut Roster, id: EmployeeId, steps: &[u32]) {
    for step in steps {
        roster.complete_step(id, *step).expect("complete");
    }
}

// =============================================================================
// TIER S0: STEP COMPLETION
// =============================================================================

mod s0_step_completion {
    use super::*;

    /// S0.1: First step of a fresh employee.
    #[test]
    fn first_step_from_fresh_record() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Ana");

        let outcome = roster.complete_step(id, 1).expect("complete");

        assert_eq!(outcome.view.progress, 17);
        assert_eq!(outcome.view.current_step, 2);
        assert_eq!(outcome.view.status, Status::InProgress);
        assert_eq!(outcome.view.completed_steps, vec![1]);
    }

    /// S0.2: Final step completes onboarding.
    #[test]
    fn final_step_completes() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Ben");
        complete_all(&mut roster, id, &[1, 2, 3, 4, 5]);

        let outcome = roster.complete_step(id, 6).expect("complete");

        assert_eq!(outcome.view.progress, 100);
        assert_eq!(outcome.view.current_step, 7);
        assert_eq!(outcome.view.status, Status::Completed);
        assert_eq!(outcome.view.completed_steps, vec![1, 2, 3, 4, 5, 6]);
    }

    /// S0.3: Step count comes from configuration.
    #[test]
    fn step_count_is_configurable() {
        let mut roster = Roster::new(OnboardingConfig::with_total_steps(4)).expect("roster");
        let id = enroll(&mut roster, "Cy");

        assert_eq!(roster.complete_step(id, 1).expect("complete").view.progress, 25);
        complete_all(&mut roster, id, &[2, 3]);
        let last = roster.complete_step(id, 4).expect("complete");
        assert_eq!(last.view.status, Status::Completed);

        assert!(matches!(
            roster.complete_step(id, 5),
            Err(OnboardError::InvalidStep { step: 5, total: 4 })
        ));
    }

    /// S0.4: Out-of-order completion follows the configured policy.
    #[test]
    fn advance_policy_governs_pointer() {
        let mut permissive = roster();
        let id = enroll(&mut permissive, "Dee");
        complete_all(&mut permissive, id, &[5, 2]);
        assert_eq!(permissive.progress(id).expect("progress").current_step, 3);

        let mut monotonic = Roster::new(
            OnboardingConfig::default().with_advance(AdvancePolicy::Monotonic),
        )
        .expect("roster");
        let id = enroll(&mut monotonic, "Eve");
        complete_all(&mut monotonic, id, &[5, 2]);
        assert_eq!(monotonic.progress(id).expect("progress").current_step, 6);
    }
}

// =============================================================================
// TIER S1: IDEMPOTENCE
// =============================================================================

mod s1_idempotence {
    use super::*;

    /// S1.1: Re-completing a step returns the same view and writes nothing.
    #[test]
    fn repeat_completion_issues_no_write() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Fay");
        complete_all(&mut roster, id, &[1, 2, 3, 4, 5, 6]);

        let before = roster.get(id).expect("get");
        let outcome = roster.complete_step(id, 3).expect("complete");
        let after = roster.get(id).expect("get");

        assert!(!outcome.changed);
        assert_eq!(outcome.view, roster.progress(id).expect("progress"));
        assert_eq!(before, after);
        assert_eq!(after.version, 6);
    }

    /// S1.2: Progress reads never mutate.
    #[test]
    fn progress_read_is_pure() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Gus");
        roster.complete_step(id, 2).expect("complete");

        let first = roster.progress(id).expect("progress");
        let second = roster.progress(id).expect("progress");
        assert_eq!(first, second);
        assert_eq!(roster.get(id).expect("get").version, 1);
    }
}

// =============================================================================
// TIER S2: STATISTICS
// =============================================================================

mod s2_statistics {
    use super::*;

    /// S2.1: Mixed population.
    #[test]
    fn mixed_population() {
        let mut roster = roster();
        roster
            .enroll(NewEmployee::admin("Root", "root@example.com", "password"))
            .expect("admin");

        let done = enroll(&mut roster, "Hal");
        complete_all(&mut roster, done, &[1, 2, 3, 4, 5, 6]);
        let half = enroll(&mut roster, "Ivy");
        complete_all(&mut roster, half, &[1, 2, 3]);
        enroll(&mut roster, "Jon");

        let stats = roster.stats().expect("stats");

        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.not_started(), 1);
        assert_eq!(stats.average_progress, 50);
        assert_eq!(
            stats.distribution.buckets(),
            [("0-25%", 1), ("26-50%", 1), ("51-75%", 0), ("76-100%", 1)]
        );
    }

    /// S2.2: No employees.
    #[test]
    fn empty_roster() {
        let stats = roster().stats().expect("stats");
        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.average_progress, 0);
    }

    /// S2.3: Removed employees stop counting.
    #[test]
    fn removed_employee_not_counted() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Kim");
        enroll(&mut roster, "Lou");

        roster.remove(id).expect("remove");

        assert_eq!(roster.stats().expect("stats").total_employees, 1);
        assert!(matches!(
            roster.get(id),
            Err(OnboardError::EmployeeNotFound(_))
        ));
    }
}

// =============================================================================
// TIER S3: COMPLETION SUMMARY
// =============================================================================

mod s3_completion_summary {
    use super::*;

    /// S3.1: In-progress employees have no summary.
    #[test]
    fn in_progress_rejected() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Max");
        roster.complete_step(id, 1).expect("complete");

        assert!(matches!(
            roster.completion_summary(id),
            Err(OnboardError::NotCompleted)
        ));
    }

    /// S3.2: Completed employees get the summary.
    #[test]
    fn completed_returns_summary() {
        let mut roster = roster();
        let id = enroll(&mut roster, "Ned");
        complete_all(&mut roster, id, &[6, 5, 4, 3, 2, 1]);

        let summary = roster.completion_summary(id).expect("summary");
        assert_eq!(summary.total_steps, 6);
        assert_eq!(summary.achievement, "Onboarding Champion!");
    }

    /// S3.3: Unknown ids have not completed onboarding.
    #[test]
    fn unknown_id_not_completed() {
        assert!(matches!(
            roster().completion_summary(EmployeeId::generate()),
            Err(OnboardError::NotCompleted)
        ));
    }
}

// =============================================================================
// TIER S4: PERSISTENCE
// =============================================================================

mod s4_persistence {
    use super::*;

    /// S4.1: Progress survives a reopen.
    #[test]
    fn progress_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("onboard.redb");
        let config = OnboardingConfig::default();

        let id = {
            let mut roster = Roster::with_redb(&path, config).expect("open");
            assert!(roster.is_persistent());
            let id = enroll(&mut roster, "Oli");
            complete_all(&mut roster, id, &[1, 2]);
            id
        };

        let mut roster = Roster::with_redb(&path, config).expect("reopen");
        let view = roster.progress(id).expect("progress");
        assert_eq!(view.completed_steps, vec![1, 2]);
        assert_eq!(view.progress, 33);

        roster.complete_step(id, 3).expect("complete");
        assert_eq!(roster.get(id).expect("get").version, 3);
        assert!(roster.authenticate("oli@example.com", "password").is_ok());
    }
}
