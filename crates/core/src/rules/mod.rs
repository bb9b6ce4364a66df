//! Object-level rule set: predicates refining matrix verdicts with
//! instance state.
//!
//! The matrix answers "may this role ever do this"; the rules here
//! answer "may it do this to *that* item". Ownership-conditioned
//! actions (edit, delete, submit) pass for full-management roles
//! unconditionally and for owners only while the item is still in an
//! owner-editable state. Validation and approval are routed purely by
//! role and state; for expenses the chargeability flag picks the
//! validating side before any management shortcut applies.
//!
//! Everything fails closed: a missing owner, a missing status where one
//! is required, or a missing chargeability flag denies.

use serde::{Deserialize, Serialize};
use worklane_shared::types::UserId;

use crate::matrix::{Action, ProjectEntity, project};
use crate::roles::ProjectRole;
use crate::workflow::types::{ApprovalStatus, DeliveryStatus, InvoiceStatus, SignatureSlots};

/// The authorization-relevant view of a validate-then-approve entity
/// (timesheet, expense, variation).
///
/// One shape for all callers: status, owner, and the domain flags that
/// gate transitions. A missing status is treated as `Draft` for
/// edit/delete purposes and as not-yet-submittable for submit/validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSnapshot {
    /// Current workflow status, if the item has ever been saved with one.
    pub status: Option<ApprovalStatus>,
    /// The creator/submitter of the item.
    pub owner: Option<UserId>,
    /// Whether the expense is chargeable to the customer. `None` for
    /// entities without the flag, and fail-closed for expenses.
    pub chargeable_to_customer: Option<bool>,
}

impl ApprovalSnapshot {
    /// Snapshot for a timesheet or variation.
    #[must_use]
    pub const fn new(status: Option<ApprovalStatus>, owner: Option<UserId>) -> Self {
        Self {
            status,
            owner,
            chargeable_to_customer: None,
        }
    }

    /// Snapshot for an expense, with its chargeability flag.
    #[must_use]
    pub const fn expense(
        status: Option<ApprovalStatus>,
        owner: Option<UserId>,
        chargeable_to_customer: bool,
    ) -> Self {
        Self {
            status,
            owner,
            chargeable_to_customer: Some(chargeable_to_customer),
        }
    }
}

/// The authorization-relevant view of a deliverable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySnapshot {
    /// Current review status. Missing means not started.
    pub status: Option<DeliveryStatus>,
    /// The contributor responsible for the deliverable.
    pub owner: Option<UserId>,
    /// The sign-off slots, independent of the review status.
    pub signoff: SignatureSlots,
}

/// The authorization-relevant view of an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    /// Current invoice status. Missing means draft.
    pub status: Option<InvoiceStatus>,
    /// The user who raised the invoice.
    pub owner: Option<UserId>,
}

/// State queries the object-level rules need from a governed instance.
///
/// Implemented by each snapshot type; the rules themselves are written
/// once against this seam.
pub trait Governed {
    /// The instance's owner, if known.
    fn owner(&self) -> Option<UserId>;
    /// True while the owner may still edit or delete the item.
    fn owner_editable(&self) -> bool;
    /// True when the item can be submitted.
    fn submittable(&self) -> bool;
    /// True when the item is awaiting validation.
    fn validatable(&self) -> bool;
    /// True when the item is awaiting approval.
    fn approvable(&self) -> bool;
    /// True when the item can be rejected.
    fn rejectable(&self) -> bool;
    /// The chargeability flag, for entities that carry one.
    fn chargeable_to_customer(&self) -> Option<bool> {
        None
    }
}

impl Governed for ApprovalSnapshot {
    fn owner(&self) -> Option<UserId> {
        self.owner
    }

    fn owner_editable(&self) -> bool {
        // Missing status counts as Draft for edit/delete purposes
        self.status.unwrap_or(ApprovalStatus::Draft).is_owner_editable()
    }

    fn submittable(&self) -> bool {
        // Missing status is not yet submittable
        self.status == Some(ApprovalStatus::Draft)
    }

    fn validatable(&self) -> bool {
        self.status == Some(ApprovalStatus::Submitted)
    }

    fn approvable(&self) -> bool {
        self.status == Some(ApprovalStatus::Validated)
    }

    fn rejectable(&self) -> bool {
        matches!(
            self.status,
            Some(ApprovalStatus::Submitted | ApprovalStatus::Validated)
        )
    }

    fn chargeable_to_customer(&self) -> Option<bool> {
        self.chargeable_to_customer
    }
}

impl Governed for DeliverySnapshot {
    fn owner(&self) -> Option<UserId> {
        self.owner
    }

    fn owner_editable(&self) -> bool {
        self.status
            .unwrap_or(DeliveryStatus::NotStarted)
            .is_owner_editable()
    }

    fn submittable(&self) -> bool {
        self.status == Some(DeliveryStatus::InProgress)
    }

    fn validatable(&self) -> bool {
        false
    }

    fn approvable(&self) -> bool {
        self.status == Some(DeliveryStatus::AwaitingReview)
    }

    fn rejectable(&self) -> bool {
        self.status == Some(DeliveryStatus::AwaitingReview)
    }
}

impl Governed for InvoiceSnapshot {
    fn owner(&self) -> Option<UserId> {
        self.owner
    }

    fn owner_editable(&self) -> bool {
        self.status.unwrap_or(InvoiceStatus::Draft).is_owner_editable()
    }

    fn submittable(&self) -> bool {
        self.status == Some(InvoiceStatus::Draft)
    }

    fn validatable(&self) -> bool {
        false
    }

    fn approvable(&self) -> bool {
        self.status == Some(InvoiceStatus::Submitted)
    }

    fn rejectable(&self) -> bool {
        self.status == Some(InvoiceStatus::Submitted)
    }
}

/// Stateless object-level rule evaluation.
pub struct ObjectRules;

impl ObjectRules {
    fn manages(role: ProjectRole, entity: ProjectEntity) -> bool {
        project::allows(role, entity, Action::Manage)
    }

    fn owns(item: &impl Governed, actor: UserId) -> bool {
        // Missing owner on either side denies
        item.owner().is_some_and(|owner| owner == actor)
    }

    /// Returns true if `role`/`actor` may edit the item.
    #[must_use]
    pub fn can_edit(
        role: ProjectRole,
        entity: ProjectEntity,
        item: &impl Governed,
        actor: UserId,
    ) -> bool {
        if Self::manages(role, entity) {
            return true;
        }
        project::allows(role, entity, Action::Edit)
            && Self::owns(item, actor)
            && item.owner_editable()
    }

    /// Returns true if `role`/`actor` may delete the item.
    ///
    /// Deletion is gated by the same owner-editable states as editing.
    #[must_use]
    pub fn can_delete(
        role: ProjectRole,
        entity: ProjectEntity,
        item: &impl Governed,
        actor: UserId,
    ) -> bool {
        if Self::manages(role, entity) {
            return true;
        }
        project::allows(role, entity, Action::Delete)
            && Self::owns(item, actor)
            && item.owner_editable()
    }

    /// Returns true if `role`/`actor` may submit the item.
    ///
    /// Even management roles cannot submit an item that is not in a
    /// submittable state.
    #[must_use]
    pub fn can_submit(
        role: ProjectRole,
        entity: ProjectEntity,
        item: &impl Governed,
        actor: UserId,
    ) -> bool {
        if !item.submittable() {
            return false;
        }
        if Self::manages(role, entity) {
            return true;
        }
        project::allows(role, entity, Action::Submit) && Self::owns(item, actor)
    }

    /// Returns true if `role` may validate the item.
    ///
    /// For expenses the chargeability flag routes validation to the
    /// customer side (chargeable) or the supplier side (non-chargeable)
    /// before any management shortcut: a management role on the wrong
    /// side is denied this action.
    #[must_use]
    pub fn can_validate(role: ProjectRole, entity: ProjectEntity, item: &impl Governed) -> bool {
        if !item.validatable() {
            return false;
        }
        if entity == ProjectEntity::Expense {
            return Self::expense_side_allows(role, item);
        }
        project::allows(role, entity, Action::Validate)
    }

    /// Returns true if `role` may approve the item.
    ///
    /// Expenses route approval the same way as validation.
    #[must_use]
    pub fn can_approve(role: ProjectRole, entity: ProjectEntity, item: &impl Governed) -> bool {
        if !item.approvable() {
            return false;
        }
        if entity == ProjectEntity::Expense {
            return Self::expense_side_allows(role, item);
        }
        project::allows(role, entity, Action::Approve)
    }

    /// Returns true if `role` may reject the item.
    #[must_use]
    pub fn can_reject(role: ProjectRole, entity: ProjectEntity, item: &impl Governed) -> bool {
        item.rejectable() && project::allows(role, entity, Action::Reject)
    }

    /// Expense validation/approval routing by chargeability.
    ///
    /// Chargeable items require the customer-side PM, non-chargeable
    /// items the supplier-side PM. A missing flag denies (fail closed).
    pub(crate) fn expense_side_allows(role: ProjectRole, item: &impl Governed) -> bool {
        match item.chargeable_to_customer() {
            Some(true) => role == ProjectRole::CustomerPm,
            Some(false) => role == ProjectRole::SupplierPm,
            None => false,
        }
    }
}
