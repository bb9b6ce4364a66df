//! Workflow engine: transition tables composed with authorization
//! guards.
//!
//! Every apply method performs the same two mandatory checks in order:
//! first reachability against the machine's transition table
//! (`InvalidTransition` on failure), then the object-level rule for the
//! action (`Forbidden` on failure). Passing only one check is never
//! sufficient. On success the engine returns the fields the caller
//! persists: the new status plus the audit trail. The engine itself
//! stores nothing.

use chrono::{DateTime, Utc};
use worklane_shared::types::UserId;

use crate::matrix::{Action, ProjectEntity, project};
use crate::roles::ProjectRole;
use crate::rules::{ApprovalSnapshot, DeliverySnapshot, InvoiceSnapshot, ObjectRules};
use crate::workflow::approval::{ApprovalAction, ApprovalMachine};
use crate::workflow::delivery::{DeliveryAction, DeliveryMachine};
use crate::workflow::error::WorkflowError;
use crate::workflow::invoice::{InvoiceAction, InvoiceMachine};
use crate::workflow::types::{ApprovalStatus, DeliveryStatus, InvoiceStatus};

/// An accepted transition: the fields the caller persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, A> {
    /// The action that was applied.
    pub action: A,
    /// The status the item was in.
    pub from: S,
    /// The status to persist.
    pub to: S,
    /// The acting user. `None` for system transitions such as marking
    /// an invoice overdue.
    pub acted_by: Option<UserId>,
    /// When the engine accepted the transition.
    pub acted_at: DateTime<Utc>,
    /// The supplied reason, for actions that require one.
    pub reason: Option<String>,
}

fn check_reason(
    requires_reason: bool,
    reason: Option<&str>,
) -> Result<Option<String>, WorkflowError> {
    if !requires_reason {
        return Ok(None);
    }
    match reason {
        Some(r) if !r.trim().is_empty() => Ok(Some(r.trim().to_string())),
        _ => Err(WorkflowError::RejectionReasonRequired),
    }
}

/// Stateless engine applying workflow transitions.
pub struct WorkflowEngine;

impl WorkflowEngine {
    /// Applies a validate-then-approve action to a timesheet, expense,
    /// or variation.
    ///
    /// A missing status is treated as `Draft`.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if `action` is not reachable from the
    ///   current status.
    /// * `RejectionReasonRequired` if rejecting without a reason.
    /// * `Forbidden` if the object-level rule denies the actor.
    pub fn apply_approval(
        entity: ProjectEntity,
        snapshot: &ApprovalSnapshot,
        action: ApprovalAction,
        role: ProjectRole,
        actor: UserId,
        reason: Option<&str>,
    ) -> Result<Transition<ApprovalStatus, ApprovalAction>, WorkflowError> {
        let from = snapshot.status.unwrap_or(ApprovalStatus::Draft);
        let Some(to) = ApprovalMachine::next(from, action, entity) else {
            return Err(WorkflowError::invalid(from.as_str(), action.as_str()));
        };
        let reason = check_reason(action.requires_reason(), reason)?;

        let allowed = match action {
            ApprovalAction::Submit => ObjectRules::can_submit(role, entity, snapshot, actor),
            ApprovalAction::Validate => ObjectRules::can_validate(role, entity, snapshot),
            ApprovalAction::Approve => ObjectRules::can_approve(role, entity, snapshot),
            ApprovalAction::Reject => ObjectRules::can_reject(role, entity, snapshot),
            ApprovalAction::Implement => project::allows(role, entity, Action::Implement),
            ApprovalAction::Reopen => ObjectRules::can_edit(role, entity, snapshot, actor),
        };
        if !allowed {
            return Err(WorkflowError::forbidden(role.as_str(), action.as_str()));
        }

        Ok(Transition {
            action,
            from,
            to,
            acted_by: Some(actor),
            acted_at: Utc::now(),
            reason,
        })
    }

    /// Applies a review action to a deliverable.
    ///
    /// A missing status is treated as `NotStarted`.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if `action` is not reachable from the
    ///   current status.
    /// * `RejectionReasonRequired` if requesting rework without a
    ///   reason.
    /// * `Forbidden` if the object-level rule denies the actor.
    pub fn apply_delivery(
        snapshot: &DeliverySnapshot,
        action: DeliveryAction,
        role: ProjectRole,
        actor: UserId,
        reason: Option<&str>,
    ) -> Result<Transition<DeliveryStatus, DeliveryAction>, WorkflowError> {
        let entity = ProjectEntity::Deliverable;
        let from = snapshot.status.unwrap_or(DeliveryStatus::NotStarted);
        let Some(to) = DeliveryMachine::next(from, action) else {
            return Err(WorkflowError::invalid(from.as_str(), action.as_str()));
        };
        let reason = check_reason(action.requires_reason(), reason)?;

        let allowed = match action {
            DeliveryAction::Start | DeliveryAction::Resume => {
                ObjectRules::can_edit(role, entity, snapshot, actor)
            }
            DeliveryAction::SubmitForReview => {
                ObjectRules::can_submit(role, entity, snapshot, actor)
            }
            DeliveryAction::ApproveReview => ObjectRules::can_approve(role, entity, snapshot),
            DeliveryAction::RequestRework => ObjectRules::can_reject(role, entity, snapshot),
            DeliveryAction::Deliver => project::allows(role, entity, Action::Deliver),
        };
        if !allowed {
            return Err(WorkflowError::forbidden(role.as_str(), action.as_str()));
        }

        Ok(Transition {
            action,
            from,
            to,
            acted_by: Some(actor),
            acted_at: Utc::now(),
            reason,
        })
    }

    /// Applies an actor action to an invoice.
    ///
    /// A missing status is treated as `Draft`. For the time-triggered
    /// overdue transition use [`Self::mark_overdue`].
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if `action` is not reachable from the
    ///   current status.
    /// * `RejectionReasonRequired` if rejecting without a reason.
    /// * `Forbidden` if the object-level rule denies the actor.
    pub fn apply_invoice(
        snapshot: &InvoiceSnapshot,
        action: InvoiceAction,
        role: ProjectRole,
        actor: UserId,
        reason: Option<&str>,
    ) -> Result<Transition<InvoiceStatus, InvoiceAction>, WorkflowError> {
        let entity = ProjectEntity::Invoice;
        let from = snapshot.status.unwrap_or(InvoiceStatus::Draft);
        let Some(to) = InvoiceMachine::next(from, action) else {
            return Err(WorkflowError::invalid(from.as_str(), action.as_str()));
        };
        let reason = check_reason(action.requires_reason(), reason)?;

        let allowed = match action {
            InvoiceAction::Submit => ObjectRules::can_submit(role, entity, snapshot, actor),
            InvoiceAction::Approve => ObjectRules::can_approve(role, entity, snapshot),
            InvoiceAction::Reject => ObjectRules::can_reject(role, entity, snapshot),
            InvoiceAction::RecordPartialPayment | InvoiceAction::RecordFullPayment => {
                project::allows(role, entity, Action::RecordPayment)
            }
            // System transition, never actor-initiated; the scheduler
            // calls `mark_overdue` against the due date instead
            InvoiceAction::MarkOverdue => false,
            InvoiceAction::Reopen => ObjectRules::can_edit(role, entity, snapshot, actor),
        };
        if !allowed {
            return Err(WorkflowError::forbidden(role.as_str(), action.as_str()));
        }

        Ok(Transition {
            action,
            from,
            to,
            acted_by: Some(actor),
            acted_at: Utc::now(),
            reason,
        })
    }

    /// Marks an approved invoice overdue. System transition: the caller
    /// evaluated the due date, no role guard applies.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if the invoice is not approved.
    pub fn mark_overdue(
        snapshot: &InvoiceSnapshot,
    ) -> Result<Transition<InvoiceStatus, InvoiceAction>, WorkflowError> {
        let from = snapshot.status.unwrap_or(InvoiceStatus::Draft);
        let Some(to) = InvoiceMachine::next(from, InvoiceAction::MarkOverdue) else {
            return Err(WorkflowError::invalid(
                from.as_str(),
                InvoiceAction::MarkOverdue.as_str(),
            ));
        };
        Ok(Transition {
            action: InvoiceAction::MarkOverdue,
            from,
            to,
            acted_by: None,
            acted_at: Utc::now(),
            reason: None,
        })
    }
}
