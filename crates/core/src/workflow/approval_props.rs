//! Property-based tests for the validate-then-approve workflow.
//!
//! These tests validate the engine's structural guarantees with
//! randomized inputs: the transition table is the single source of
//! reachability, guards only ever narrow it, and refusals are total.

use proptest::prelude::*;
use uuid::Uuid;

use worklane_shared::types::UserId;

use crate::matrix::ProjectEntity;
use crate::roles::ProjectRole;
use crate::rules::ApprovalSnapshot;
use crate::workflow::approval::{ApprovalAction, ApprovalMachine};
use crate::workflow::engine::WorkflowEngine;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::ApprovalStatus;

/// Strategy for generating random ApprovalStatus values.
fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Draft),
        Just(ApprovalStatus::Submitted),
        Just(ApprovalStatus::Validated),
        Just(ApprovalStatus::Approved),
        Just(ApprovalStatus::Rejected),
        Just(ApprovalStatus::Implemented),
    ]
}

/// Strategy for generating random ApprovalAction values.
fn arb_action() -> impl Strategy<Value = ApprovalAction> {
    prop_oneof![
        Just(ApprovalAction::Submit),
        Just(ApprovalAction::Validate),
        Just(ApprovalAction::Approve),
        Just(ApprovalAction::Reject),
        Just(ApprovalAction::Implement),
        Just(ApprovalAction::Reopen),
    ]
}

/// Strategy for the entities governed by this workflow family.
fn arb_entity() -> impl Strategy<Value = ProjectEntity> {
    prop_oneof![
        Just(ProjectEntity::Timesheet),
        Just(ProjectEntity::Expense),
        Just(ProjectEntity::Variation),
    ]
}

/// Strategy for generating random project roles.
fn arb_role() -> impl Strategy<Value = ProjectRole> {
    prop_oneof![
        Just(ProjectRole::Viewer),
        Just(ProjectRole::Contributor),
        Just(ProjectRole::CustomerPm),
        Just(ProjectRole::SupplierPm),
    ]
}

/// Strategy for generating random user IDs.
fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An accepted transition always agrees with the machine table.
    #[test]
    fn prop_engine_accepts_only_table_transitions(
        status in arb_status(),
        action in arb_action(),
        entity in arb_entity(),
        role in arb_role(),
        actor in arb_user(),
        owner in arb_user(),
    ) {
        let snapshot = ApprovalSnapshot::expense(Some(status), Some(owner), true);
        let result = WorkflowEngine::apply_approval(
            entity, &snapshot, action, role, actor, Some("because"),
        );
        if let Ok(transition) = result {
            prop_assert_eq!(transition.from, status);
            prop_assert_eq!(
                ApprovalMachine::next(status, action, entity),
                Some(transition.to)
            );
        }
    }

    /// An action the table does not define is always InvalidTransition,
    /// regardless of who asks.
    #[test]
    fn prop_unreachable_actions_fail_as_invalid(
        status in arb_status(),
        action in arb_action(),
        entity in arb_entity(),
        role in arb_role(),
        actor in arb_user(),
    ) {
        prop_assume!(ApprovalMachine::next(status, action, entity).is_none());
        let snapshot = ApprovalSnapshot::new(Some(status), Some(actor));
        let err = WorkflowEngine::apply_approval(
            entity, &snapshot, action, role, actor, Some("because"),
        )
        .unwrap_err();
        let invalid = matches!(err, WorkflowError::InvalidTransition { .. });
        prop_assert!(invalid, "expected InvalidTransition, got {err}");
    }

    /// Terminal states accept no actor-initiated transitions.
    #[test]
    fn prop_terminal_states_are_terminal(
        action in arb_action(),
        role in arb_role(),
        actor in arb_user(),
    ) {
        for (status, entity) in [
            (ApprovalStatus::Approved, ProjectEntity::Timesheet),
            (ApprovalStatus::Approved, ProjectEntity::Expense),
            (ApprovalStatus::Implemented, ProjectEntity::Variation),
        ] {
            let snapshot = ApprovalSnapshot::new(Some(status), Some(actor));
            let result = WorkflowEngine::apply_approval(
                entity, &snapshot, action, role, actor, Some("because"),
            );
            prop_assert!(result.is_err(), "{status} must be terminal for {entity:?}");
        }
    }

    /// Viewers can never move anything through this workflow.
    #[test]
    fn prop_viewer_never_transitions(
        status in arb_status(),
        action in arb_action(),
        entity in arb_entity(),
        actor in arb_user(),
        owner in arb_user(),
    ) {
        let snapshot = ApprovalSnapshot::new(Some(status), Some(owner));
        let result = WorkflowEngine::apply_approval(
            entity, &snapshot, action, ProjectRole::Viewer, actor, Some("because"),
        );
        prop_assert!(result.is_err());
    }

    /// Rejection without a usable reason never succeeds.
    #[test]
    fn prop_reject_requires_reason(
        status in arb_status(),
        entity in arb_entity(),
        role in arb_role(),
        actor in arb_user(),
        blank in "[ \t]{0,8}",
    ) {
        for reason in [None, Some(blank.as_str())] {
            let snapshot = ApprovalSnapshot::new(Some(status), Some(actor));
            let result = WorkflowEngine::apply_approval(
                entity, &snapshot, ApprovalAction::Reject, role, actor, reason,
            );
            prop_assert!(result.is_err());
        }
    }

    /// The supplied reason survives into the audit fields, trimmed.
    #[test]
    fn prop_reject_carries_reason(reason in "[a-zA-Z0-9 ]{1,60}") {
        prop_assume!(!reason.trim().is_empty());
        let snapshot = ApprovalSnapshot::new(Some(ApprovalStatus::Submitted), Some(UserId::new()));
        let transition = WorkflowEngine::apply_approval(
            ProjectEntity::Timesheet,
            &snapshot,
            ApprovalAction::Reject,
            ProjectRole::SupplierPm,
            UserId::new(),
            Some(&reason),
        )
        .unwrap();
        prop_assert_eq!(transition.reason.as_deref(), Some(reason.trim()));
        prop_assert_eq!(transition.to, ApprovalStatus::Rejected);
    }
}
