//! Validate-then-approve state machine (timesheets, expenses,
//! variations).
//!
//! The machine is a pure transition table: it answers reachability only.
//! Role and ownership guards live in the engine, which consults this
//! table first and the object-level rules second.

use std::fmt;

use crate::matrix::ProjectEntity;
use crate::workflow::types::ApprovalStatus;

/// Actions in the validate-then-approve workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    /// Owner submits a draft for validation.
    Submit,
    /// Supplier- or customer-side PM validates a submission.
    Validate,
    /// The approving side approves a validated item.
    Approve,
    /// An authorized role sends a submitted or validated item back.
    Reject,
    /// The supplier marks an approved variation as implemented.
    Implement,
    /// A rejected item reopens to draft when its owner re-edits it.
    /// Implicit; never offered as a UI affordance.
    Reopen,
}

impl ApprovalAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Validate => "validate",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Implement => "implement",
            Self::Reopen => "reopen",
        }
    }

    /// Returns true if performing this action requires a reason.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::Reject)
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless transition table for the validate-then-approve workflow.
pub struct ApprovalMachine;

impl ApprovalMachine {
    /// Returns the state `action` leads to from `from`, or `None` if the
    /// action is not reachable.
    ///
    /// `Implement` exists only for variations; `Approved` is terminal for
    /// every other entity in this family.
    #[must_use]
    pub fn next(
        from: ApprovalStatus,
        action: ApprovalAction,
        entity: ProjectEntity,
    ) -> Option<ApprovalStatus> {
        match (from, action) {
            (ApprovalStatus::Draft, ApprovalAction::Submit) => Some(ApprovalStatus::Submitted),
            (ApprovalStatus::Submitted, ApprovalAction::Validate) => {
                Some(ApprovalStatus::Validated)
            }
            (ApprovalStatus::Validated, ApprovalAction::Approve) => Some(ApprovalStatus::Approved),
            (
                ApprovalStatus::Submitted | ApprovalStatus::Validated,
                ApprovalAction::Reject,
            ) => Some(ApprovalStatus::Rejected),
            (ApprovalStatus::Approved, ApprovalAction::Implement)
                if entity == ProjectEntity::Variation =>
            {
                Some(ApprovalStatus::Implemented)
            }
            (ApprovalStatus::Rejected, ApprovalAction::Reopen) => Some(ApprovalStatus::Draft),
            _ => None,
        }
    }

    /// Returns the actor-facing actions reachable from `from`.
    ///
    /// `Reopen` is excluded: it happens as a side effect of the owner
    /// re-editing, never as a menu item.
    #[must_use]
    pub fn actions_from(from: ApprovalStatus, entity: ProjectEntity) -> Vec<ApprovalAction> {
        match from {
            ApprovalStatus::Draft => vec![ApprovalAction::Submit],
            ApprovalStatus::Submitted => vec![ApprovalAction::Validate, ApprovalAction::Reject],
            ApprovalStatus::Validated => vec![ApprovalAction::Approve, ApprovalAction::Reject],
            ApprovalStatus::Approved if entity == ProjectEntity::Variation => {
                vec![ApprovalAction::Implement]
            }
            ApprovalStatus::Approved | ApprovalStatus::Rejected | ApprovalStatus::Implemented => {
                Vec::new()
            }
        }
    }
}
