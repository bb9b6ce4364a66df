//! Property-based tests for the decision facade.
//!
//! These pin down the facade's two safety invariants: verdicts fail
//! closed, and a refinement (snapshot, impersonation fallback) can only
//! narrow what the matrix grants, never widen it.

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use worklane_shared::types::{SessionId, UserId};

use crate::actor::{Actor, ViewAsOverride};
use crate::decision::{DecisionFacade, Entity, Snapshot};
use crate::matrix::{Action, OrgEntity, ProjectEntity};
use crate::roles::ProjectRole;
use crate::rules::{ApprovalSnapshot, DeliverySnapshot, InvoiceSnapshot};
use crate::workflow::types::{ApprovalStatus, DeliveryStatus, InvoiceStatus, SignatureSlots};

fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

fn arb_role() -> impl Strategy<Value = ProjectRole> {
    prop_oneof![
        Just(ProjectRole::Viewer),
        Just(ProjectRole::Contributor),
        Just(ProjectRole::CustomerPm),
        Just(ProjectRole::SupplierPm),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::View),
        Just(Action::ViewCostPrice),
        Just(Action::Create),
        Just(Action::Edit),
        Just(Action::Delete),
        Just(Action::Submit),
        Just(Action::Validate),
        Just(Action::Approve),
        Just(Action::Reject),
        Just(Action::Sign),
        Just(Action::Deliver),
        Just(Action::Implement),
        Just(Action::Invite),
        Just(Action::RecordPayment),
        Just(Action::Manage),
    ]
}

fn arb_project_entity() -> impl Strategy<Value = ProjectEntity> {
    prop_oneof![
        Just(ProjectEntity::Timesheet),
        Just(ProjectEntity::Expense),
        Just(ProjectEntity::Milestone),
        Just(ProjectEntity::Deliverable),
        Just(ProjectEntity::Resource),
        Just(ProjectEntity::Partner),
        Just(ProjectEntity::Variation),
        Just(ProjectEntity::Certificate),
        Just(ProjectEntity::Invoice),
        Just(ProjectEntity::Users),
        Just(ProjectEntity::Settings),
    ]
}

fn arb_org_entity() -> impl Strategy<Value = OrgEntity> {
    prop_oneof![
        Just(OrgEntity::Organisation),
        Just(OrgEntity::OrgMembers),
        Just(OrgEntity::OrgProjects),
        Just(OrgEntity::OrgSettings),
    ]
}

fn arb_approval_status() -> impl Strategy<Value = Option<ApprovalStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(ApprovalStatus::Draft)),
        Just(Some(ApprovalStatus::Submitted)),
        Just(Some(ApprovalStatus::Validated)),
        Just(Some(ApprovalStatus::Approved)),
        Just(Some(ApprovalStatus::Rejected)),
    ]
}

fn arb_approval_parts() -> impl Strategy<Value = (Option<ApprovalStatus>, Option<UserId>, bool)> {
    (arb_approval_status(), proptest::option::of(arb_user()), any::<bool>())
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    prop_oneof![
        arb_approval_parts().prop_map(|(status, owner, _)| {
            Snapshot::Timesheet(ApprovalSnapshot::new(status, owner))
        }),
        arb_approval_parts().prop_map(|(status, owner, chargeable)| {
            Snapshot::Expense(ApprovalSnapshot {
                status,
                owner,
                chargeable_to_customer: Some(chargeable),
            })
        }),
        arb_approval_parts().prop_map(|(status, owner, _)| {
            Snapshot::Variation(ApprovalSnapshot::new(status, owner))
        }),
        (proptest::option::of(arb_user())).prop_map(|owner| {
            Snapshot::Deliverable(DeliverySnapshot {
                status: Some(DeliveryStatus::InProgress),
                owner,
                signoff: SignatureSlots::default(),
            })
        }),
        Just(Snapshot::Milestone(SignatureSlots::default())),
        Just(Snapshot::Certificate(SignatureSlots::default())),
        (proptest::option::of(arb_user())).prop_map(|owner| {
            Snapshot::Invoice(InvoiceSnapshot {
                status: Some(InvoiceStatus::Submitted),
                owner,
            })
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An actor with no resolvable role is denied everything, on both
    /// tiers, with or without a snapshot.
    #[test]
    fn prop_no_role_is_denied_everything(
        id in arb_user(),
        action in arb_action(),
        project_entity in arb_project_entity(),
        org_entity in arb_org_entity(),
        snapshot in arb_snapshot(),
    ) {
        let facade = DecisionFacade::default();
        let actor = Actor::new(id);
        prop_assert!(!facade.can(&actor, action, Entity::Project(project_entity), None));
        prop_assert!(!facade.can(&actor, action, Entity::Project(project_entity), Some(&snapshot)));
        prop_assert!(!facade.can(&actor, action, Entity::Org(org_entity), None));
    }

    /// A snapshot can only narrow the matrix verdict, never widen it.
    #[test]
    fn prop_snapshot_never_widens(
        id in arb_user(),
        role in arb_role(),
        action in arb_action(),
        snapshot in arb_snapshot(),
    ) {
        let facade = DecisionFacade::default();
        let actor = Actor::new(id).with_project_role(role);
        let entity = Entity::Project(snapshot.entity());
        let with_snapshot = facade.can(&actor, action, entity, Some(&snapshot));
        let without = facade.can(&actor, action, entity, None);
        prop_assert!(!with_snapshot || without, "snapshot widened {action} for {role}");
    }

    /// Impersonation is equivalent to really holding the impersonated
    /// role: the resolver feeds one role into decisions, nothing else.
    #[test]
    fn prop_impersonation_matches_real_role(
        id in arb_user(),
        viewed in arb_role(),
        action in arb_action(),
        entity in arb_project_entity(),
        snapshot in arb_snapshot(),
    ) {
        let facade = DecisionFacade::default();
        let impersonating = Actor::new(id)
            .with_project_role(ProjectRole::SupplierPm)
            .with_view_as(ViewAsOverride {
                role: viewed,
                session: SessionId::new(),
                started_at: Utc::now(),
            });
        let plain = Actor::new(id).with_project_role(viewed);
        let target = Entity::Project(entity);
        prop_assert_eq!(
            facade.can(&impersonating, action, target, Some(&snapshot)),
            facade.can(&plain, action, target, Some(&snapshot))
        );
    }

    /// An override held by an unprivileged role changes nothing.
    #[test]
    fn prop_unprivileged_override_is_inert(
        id in arb_user(),
        real in arb_role(),
        viewed in arb_role(),
        action in arb_action(),
        entity in arb_project_entity(),
    ) {
        prop_assume!(real != ProjectRole::SupplierPm);
        let facade = DecisionFacade::default();
        let with_override = Actor::new(id)
            .with_project_role(real)
            .with_view_as(ViewAsOverride {
                role: viewed,
                session: SessionId::new(),
                started_at: Utc::now(),
            });
        let plain = Actor::new(id).with_project_role(real);
        let target = Entity::Project(entity);
        prop_assert_eq!(
            facade.can(&with_override, action, target, None),
            facade.can(&plain, action, target, None)
        );
    }

    /// Every enumerated transition starts at the snapshot's current
    /// status and names at least one role.
    #[test]
    fn prop_next_transitions_are_well_formed(snapshot in arb_snapshot()) {
        let facade = DecisionFacade::default();
        for spec in facade.next_transitions(&snapshot) {
            prop_assert!(!spec.roles.is_empty(), "{} has no roles", spec.action);
            prop_assert!(!spec.action.is_empty());
            prop_assert_ne!(spec.from, "");
        }
    }
}
