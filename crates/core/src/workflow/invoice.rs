//! Partner invoice state machine.
//!
//! Submission and approval followed by payment tracking. `MarkOverdue`
//! is time-triggered: the caller evaluates the due date and asks for the
//! transition; the engine never fires it on its own. An overdue invoice
//! can still be paid off, partially or in full.

use std::fmt;

use crate::workflow::types::InvoiceStatus;

/// Actions in the invoice workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceAction {
    /// The raising partner submits a draft invoice.
    Submit,
    /// The customer approves a submitted invoice.
    Approve,
    /// The customer rejects a submitted invoice.
    Reject,
    /// The supplier records a partial payment.
    RecordPartialPayment,
    /// The supplier records payment in full.
    RecordFullPayment,
    /// The scheduler flags an approved invoice past its due date.
    // System transition: no role guard.
    MarkOverdue,
    /// A rejected invoice reopens to draft when re-edited. Implicit;
    /// never offered as a UI affordance.
    Reopen,
}

impl InvoiceAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::RecordPartialPayment => "record_partial_payment",
            Self::RecordFullPayment => "record_full_payment",
            Self::MarkOverdue => "mark_overdue",
            Self::Reopen => "reopen",
        }
    }

    /// Returns true if performing this action requires a reason.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::Reject)
    }
}

impl fmt::Display for InvoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless transition table for the invoice workflow.
pub struct InvoiceMachine;

impl InvoiceMachine {
    /// Returns the state `action` leads to from `from`, or `None` if the
    /// action is not reachable.
    #[must_use]
    pub const fn next(from: InvoiceStatus, action: InvoiceAction) -> Option<InvoiceStatus> {
        match (from, action) {
            (InvoiceStatus::Draft, InvoiceAction::Submit) => Some(InvoiceStatus::Submitted),
            (InvoiceStatus::Submitted, InvoiceAction::Approve) => Some(InvoiceStatus::Approved),
            (InvoiceStatus::Submitted, InvoiceAction::Reject) => Some(InvoiceStatus::Rejected),
            (
                InvoiceStatus::Approved | InvoiceStatus::Overdue,
                InvoiceAction::RecordPartialPayment,
            ) => Some(InvoiceStatus::PartiallyPaid),
            (
                InvoiceStatus::Approved | InvoiceStatus::PartiallyPaid | InvoiceStatus::Overdue,
                InvoiceAction::RecordFullPayment,
            ) => Some(InvoiceStatus::Paid),
            (InvoiceStatus::Approved, InvoiceAction::MarkOverdue) => Some(InvoiceStatus::Overdue),
            (InvoiceStatus::Rejected, InvoiceAction::Reopen) => Some(InvoiceStatus::Draft),
            _ => None,
        }
    }

    /// Returns the actor-facing actions reachable from `from`.
    ///
    /// `MarkOverdue` and `Reopen` are excluded: the first is
    /// scheduler-triggered and the second happens as a side effect of
    /// the owner re-editing.
    #[must_use]
    pub fn actions_from(from: InvoiceStatus) -> Vec<InvoiceAction> {
        match from {
            InvoiceStatus::Draft => vec![InvoiceAction::Submit],
            InvoiceStatus::Submitted => vec![InvoiceAction::Approve, InvoiceAction::Reject],
            InvoiceStatus::Approved | InvoiceStatus::Overdue => vec![
                InvoiceAction::RecordPartialPayment,
                InvoiceAction::RecordFullPayment,
            ],
            InvoiceStatus::PartiallyPaid => vec![InvoiceAction::RecordFullPayment],
            InvoiceStatus::Rejected | InvoiceStatus::Paid => Vec::new(),
        }
    }
}
