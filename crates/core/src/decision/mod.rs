//! Decision facade: the single entry point for authorization checks.
//!
//! Collaborators ask two questions: [`DecisionFacade::can`] — may this
//! actor perform this action, optionally against a concrete instance —
//! and [`DecisionFacade::next_transitions`] — which workflow actions
//! are currently reachable, for rendering action menus. Both are pure
//! table lookups plus O(1) predicate evaluation; the facade holds only
//! static configuration (the impersonation policy), never entity data.
//!
//! `can` is fail-closed: no resolvable role, a tier mismatch, or a
//! snapshot for the wrong entity all produce `false`, never an error.

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ImpersonationPolicy};
use crate::matrix::{Action, OrgEntity, ProjectEntity, org, project};
use crate::roles::ProjectRole;
use crate::rules::{ApprovalSnapshot, DeliverySnapshot, Governed, InvoiceSnapshot, ObjectRules};
use crate::workflow::approval::{ApprovalAction, ApprovalMachine};
use crate::workflow::delivery::{DeliveryAction, DeliveryMachine};
use crate::workflow::invoice::{InvoiceAction, InvoiceMachine};
use crate::workflow::types::{
    ApprovalStatus, DeliveryStatus, InvoiceStatus, SignatureSide, SignatureSlots, SignatureState,
};

/// The target of an authorization check, across both tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// An organisation-tier entity.
    Org(OrgEntity),
    /// A project-tier entity.
    Project(ProjectEntity),
}

/// An instance snapshot for object-level checks.
///
/// The page layer fetches the instance and hands the engine only the
/// authorization-relevant fields; the engine never fetches data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snapshot {
    /// A timesheet in the validate-then-approve workflow.
    Timesheet(ApprovalSnapshot),
    /// An expense, with its chargeability flag.
    Expense(ApprovalSnapshot),
    /// A contract variation.
    Variation(ApprovalSnapshot),
    /// A deliverable in the review workflow.
    Deliverable(DeliverySnapshot),
    /// A milestone baseline awaiting dual signature.
    Milestone(SignatureSlots),
    /// A milestone certificate awaiting dual signature.
    Certificate(SignatureSlots),
    /// A partner invoice.
    Invoice(InvoiceSnapshot),
}

impl Snapshot {
    /// Returns the entity type this snapshot belongs to.
    #[must_use]
    pub const fn entity(&self) -> ProjectEntity {
        match self {
            Self::Timesheet(_) => ProjectEntity::Timesheet,
            Self::Expense(_) => ProjectEntity::Expense,
            Self::Variation(_) => ProjectEntity::Variation,
            Self::Deliverable(_) => ProjectEntity::Deliverable,
            Self::Milestone(_) => ProjectEntity::Milestone,
            Self::Certificate(_) => ProjectEntity::Certificate,
            Self::Invoice(_) => ProjectEntity::Invoice,
        }
    }
}

/// A currently reachable workflow transition, for UI affordances.
///
/// Enumeration only: performing the transition still goes through the
/// workflow engine, which re-checks everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// The action label.
    pub action: String,
    /// The current status.
    pub from: &'static str,
    /// The status the action leads to.
    pub to: &'static str,
    /// The roles that may currently perform the action.
    pub roles: Vec<ProjectRole>,
}

/// The single authorization entry point.
#[derive(Debug, Clone, Default)]
pub struct DecisionFacade {
    policy: ImpersonationPolicy,
}

impl DecisionFacade {
    /// Creates a facade with the given impersonation policy.
    #[must_use]
    pub const fn new(policy: ImpersonationPolicy) -> Self {
        Self { policy }
    }

    /// Returns true if `actor` may perform `action` on `entity`,
    /// refined by `snapshot` when one is supplied.
    ///
    /// The verdict is the logical AND of the matrix lookup for the
    /// actor's effective role and, for governed instances, the
    /// object-level rule for the action.
    #[must_use]
    pub fn can(
        &self,
        actor: &Actor,
        action: Action,
        entity: Entity,
        snapshot: Option<&Snapshot>,
    ) -> bool {
        let verdict = self.evaluate(actor, action, entity, snapshot);
        tracing::debug!(
            actor = %actor.id,
            action = %action,
            ?entity,
            verdict,
            "authorization decision"
        );
        verdict
    }

    fn evaluate(
        &self,
        actor: &Actor,
        action: Action,
        entity: Entity,
        snapshot: Option<&Snapshot>,
    ) -> bool {
        match entity {
            Entity::Org(org_entity) => {
                // No impersonation at the organisation tier
                let Some(role) = actor.effective_org_role() else {
                    return false;
                };
                org::allows(role, org_entity, action)
            }
            Entity::Project(project_entity) => {
                let Some(role) = actor.effective_project_role(&self.policy) else {
                    return false;
                };
                if !project::allows(role, project_entity, action) {
                    return false;
                }
                match snapshot {
                    None => true,
                    Some(snapshot) if snapshot.entity() != project_entity => false,
                    Some(snapshot) => Self::object_verdict(role, snapshot, action, actor),
                }
            }
        }
    }

    fn object_verdict(
        role: ProjectRole,
        snapshot: &Snapshot,
        action: Action,
        actor: &Actor,
    ) -> bool {
        let entity = snapshot.entity();
        match snapshot {
            Snapshot::Timesheet(item) | Snapshot::Expense(item) | Snapshot::Variation(item) => {
                Self::governed_verdict(role, entity, item, action, actor)
            }
            Snapshot::Deliverable(item) => match action {
                // A completed sign-off join accepts no further signatures
                Action::Sign => !item.signoff.is_fully_signed(),
                _ => Self::governed_verdict(role, entity, item, action, actor),
            },
            Snapshot::Invoice(item) => Self::governed_verdict(role, entity, item, action, actor),
            Snapshot::Milestone(slots) | Snapshot::Certificate(slots) => match action {
                // A completed join accepts no further signatures
                Action::Sign => !slots.is_fully_signed(),
                _ => true,
            },
        }
    }

    fn governed_verdict(
        role: ProjectRole,
        entity: ProjectEntity,
        item: &impl Governed,
        action: Action,
        actor: &Actor,
    ) -> bool {
        match action {
            Action::Edit => ObjectRules::can_edit(role, entity, item, actor.id),
            Action::Delete => ObjectRules::can_delete(role, entity, item, actor.id),
            Action::Submit => ObjectRules::can_submit(role, entity, item, actor.id),
            Action::Validate => ObjectRules::can_validate(role, entity, item),
            Action::Approve => ObjectRules::can_approve(role, entity, item),
            Action::Reject => ObjectRules::can_reject(role, entity, item),
            // Remaining actions are not state-conditioned
            _ => true,
        }
    }

    /// Enumerates the workflow transitions currently reachable from
    /// `snapshot`, with the roles that may perform each.
    ///
    /// System and implicit transitions (marking an invoice overdue,
    /// reopening a rejected item) are never enumerated. Used to drive
    /// UI menus, not to perform transitions.
    #[must_use]
    pub fn next_transitions(&self, snapshot: &Snapshot) -> Vec<TransitionSpec> {
        match snapshot {
            Snapshot::Timesheet(item) | Snapshot::Expense(item) | Snapshot::Variation(item) => {
                Self::approval_transitions(snapshot.entity(), item)
            }
            Snapshot::Deliverable(item) => Self::delivery_transitions(item),
            Snapshot::Milestone(slots) | Snapshot::Certificate(slots) => {
                Self::signoff_transitions(slots)
            }
            Snapshot::Invoice(item) => Self::invoice_transitions(item),
        }
    }

    fn approval_transitions(entity: ProjectEntity, item: &ApprovalSnapshot) -> Vec<TransitionSpec> {
        let from = item.status.unwrap_or(ApprovalStatus::Draft);
        ApprovalMachine::actions_from(from, entity)
            .into_iter()
            .filter_map(|action| {
                let to = ApprovalMachine::next(from, action, entity)?;
                let guard = match action {
                    ApprovalAction::Submit => Action::Submit,
                    ApprovalAction::Validate => Action::Validate,
                    ApprovalAction::Approve => Action::Approve,
                    ApprovalAction::Reject => Action::Reject,
                    ApprovalAction::Implement => Action::Implement,
                    ApprovalAction::Reopen => return None,
                };
                let roles: Vec<ProjectRole> = project::roles_for(entity, guard)
                    .iter()
                    .copied()
                    .filter(|&role| match action {
                        // Chargeability picks the validating side
                        ApprovalAction::Validate | ApprovalAction::Approve
                            if entity == ProjectEntity::Expense =>
                        {
                            ObjectRules::expense_side_allows(role, item)
                        }
                        _ => true,
                    })
                    .collect();
                (!roles.is_empty()).then(|| TransitionSpec {
                    action: action.as_str().to_string(),
                    from: from.as_str(),
                    to: to.as_str(),
                    roles,
                })
            })
            .collect()
    }

    fn delivery_transitions(item: &DeliverySnapshot) -> Vec<TransitionSpec> {
        let entity = ProjectEntity::Deliverable;
        let from = item.status.unwrap_or(DeliveryStatus::NotStarted);
        let mut transitions: Vec<TransitionSpec> = DeliveryMachine::actions_from(from)
            .into_iter()
            .filter_map(|action| {
                let to = DeliveryMachine::next(from, action)?;
                let guard = match action {
                    DeliveryAction::Start | DeliveryAction::Resume => Action::Edit,
                    DeliveryAction::SubmitForReview => Action::Submit,
                    DeliveryAction::ApproveReview => Action::Approve,
                    DeliveryAction::RequestRework => Action::Reject,
                    DeliveryAction::Deliver => Action::Deliver,
                };
                let roles: Vec<ProjectRole> =
                    project::roles_for(entity, guard).iter().copied().collect();
                (!roles.is_empty()).then(|| TransitionSpec {
                    action: action.as_str().to_string(),
                    from: from.as_str(),
                    to: to.as_str(),
                    roles,
                })
            })
            .collect();
        // The sign-off join runs alongside the review workflow
        transitions.extend(Self::signoff_transitions(&item.signoff));
        transitions
    }

    fn signoff_transitions(slots: &SignatureSlots) -> Vec<TransitionSpec> {
        if slots.is_fully_signed() {
            return Vec::new();
        }
        let from = slots.state();
        let mut transitions = Vec::with_capacity(2);
        for side in [SignatureSide::Supplier, SignatureSide::Customer] {
            let other_filled = match side {
                SignatureSide::Supplier => slots.customer.is_some(),
                SignatureSide::Customer => slots.supplier.is_some(),
            };
            let to = if other_filled {
                SignatureState::Signed
            } else {
                match side {
                    SignatureSide::Supplier => SignatureState::AwaitingCustomer,
                    SignatureSide::Customer => SignatureState::AwaitingSupplier,
                }
            };
            transitions.push(TransitionSpec {
                action: format!("sign_{side}"),
                from: from.as_str(),
                to: to.as_str(),
                roles: vec![side.required_role()],
            });
        }
        transitions
    }

    fn invoice_transitions(item: &InvoiceSnapshot) -> Vec<TransitionSpec> {
        let entity = ProjectEntity::Invoice;
        let from = item.status.unwrap_or(InvoiceStatus::Draft);
        InvoiceMachine::actions_from(from)
            .into_iter()
            .filter_map(|action| {
                let to = InvoiceMachine::next(from, action)?;
                let guard = match action {
                    InvoiceAction::Submit => Action::Submit,
                    InvoiceAction::Approve => Action::Approve,
                    InvoiceAction::Reject => Action::Reject,
                    InvoiceAction::RecordPartialPayment | InvoiceAction::RecordFullPayment => {
                        Action::RecordPayment
                    }
                    InvoiceAction::MarkOverdue | InvoiceAction::Reopen => return None,
                };
                let roles: Vec<ProjectRole> =
                    project::roles_for(entity, guard).iter().copied().collect();
                (!roles.is_empty()).then(|| TransitionSpec {
                    action: action.as_str().to_string(),
                    from: from.as_str(),
                    to: to.as_str(),
                    roles,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod props;
