//! Workflow domain types: status enums and signature slots.
//!
//! Each workflow family has its own closed status enum, so an
//! unrecognised value is an explicit parse failure rather than a
//! silently-false string comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use worklane_shared::types::UserId;

use crate::roles::ProjectRole;

/// Status in the validate-then-approve workflow (timesheets, expenses,
/// variations).
///
/// The valid actor transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Validated (validate)
/// - Validated → Approved (approve)
/// - Submitted | Validated → Rejected (reject)
/// - Approved → Implemented (implement, variations only)
///
/// Rejected → Draft happens automatically when the owner re-edits the
/// item; it is not an actor transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Being drafted by its owner.
    Draft,
    /// Submitted, awaiting validation.
    Submitted,
    /// Validated, awaiting approval.
    Validated,
    /// Approved. Terminal except for variations.
    Approved,
    /// Rejected; reopens to Draft when re-edited.
    Rejected,
    /// Implemented (variations only). Terminal.
    Implemented,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Validated => "validated",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Implemented => "implemented",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "validated" => Some(Self::Validated),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "implemented" => Some(Self::Implemented),
            _ => None,
        }
    }

    /// Returns true if the owner may still edit the item.
    #[must_use]
    pub const fn is_owner_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status in the deliverable review workflow.
///
/// The valid transitions are:
/// - NotStarted → InProgress (start)
/// - InProgress → AwaitingReview (submit for review)
/// - AwaitingReview → ReviewComplete (approve review)
/// - AwaitingReview → Rework (request rework)
/// - Rework → InProgress (resume)
/// - ReviewComplete → Delivered (deliver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Work has not begun.
    NotStarted,
    /// Being worked on.
    InProgress,
    /// Submitted for customer review.
    AwaitingReview,
    /// Review passed; ready to deliver.
    ReviewComplete,
    /// Review requested changes.
    Rework,
    /// Delivered. Terminal.
    Delivered,
}

impl DeliveryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::AwaitingReview => "awaiting_review",
            Self::ReviewComplete => "review_complete",
            Self::Rework => "rework",
            Self::Delivered => "delivered",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "awaiting_review" => Some(Self::AwaitingReview),
            "review_complete" => Some(Self::ReviewComplete),
            "rework" => Some(Self::Rework),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Returns true if the deliverable is still being worked on by its
    /// owner.
    #[must_use]
    pub const fn is_owner_editable(self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress | Self::Rework)
    }

    /// Returns true if no further actor transitions exist.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status in the invoice workflow.
///
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Submitted → Rejected (reject)
/// - Approved | Overdue → PartiallyPaid (record partial payment)
/// - Approved | PartiallyPaid | Overdue → Paid (record full payment)
/// - Approved → Overdue (time-triggered by the caller against the due
///   date; the engine never fires it spontaneously)
///
/// Rejected → Draft happens automatically when the invoice is re-edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being drafted.
    Draft,
    /// Submitted to the customer.
    Submitted,
    /// Approved, awaiting payment.
    Approved,
    /// Rejected; reopens to Draft when re-edited.
    Rejected,
    /// Partially paid.
    PartiallyPaid,
    /// Fully paid. Terminal.
    Paid,
    /// Past its due date without full payment.
    Overdue,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "partially_paid" => Some(Self::PartiallyPaid),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Returns true if the owner may still edit the invoice.
    #[must_use]
    pub const fn is_owner_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if no further actor transitions exist.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of a dual-signature document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureSide {
    /// The supplier-side slot.
    Supplier,
    /// The customer-side slot.
    Customer,
}

impl SignatureSide {
    /// Returns the project role required to sign this side.
    #[must_use]
    pub const fn required_role(self) -> ProjectRole {
        match self {
            Self::Supplier => ProjectRole::SupplierPm,
            Self::Customer => ProjectRole::CustomerPm,
        }
    }

    /// Returns the string representation of the side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supplier => "supplier",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for SignatureSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded signature for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// The signing user.
    pub signer: UserId,
    /// The signer's display name at signing time.
    pub signer_name: String,
    /// When the slot was signed.
    pub signed_at: DateTime<Utc>,
}

/// The two independent signature slots of a dual-signature document.
///
/// This is a 2-of-2 join, not a sequence: either party may sign first.
/// Re-signing a slot overwrites it; no history of prior signers is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSlots {
    /// The supplier-side signature, if present.
    pub supplier: Option<Signature>,
    /// The customer-side signature, if present.
    pub customer: Option<Signature>,
}

/// Status derived from the two signature slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureState {
    /// Neither side has signed.
    NotSigned,
    /// Only the customer has signed.
    AwaitingSupplier,
    /// Only the supplier has signed.
    AwaitingCustomer,
    /// Both sides have signed. Terminal.
    Signed,
}

impl SignatureState {
    /// Returns the string representation of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSigned => "not_signed",
            Self::AwaitingSupplier => "awaiting_supplier",
            Self::AwaitingCustomer => "awaiting_customer",
            Self::Signed => "signed",
        }
    }
}

impl fmt::Display for SignatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SignatureSlots {
    /// Returns the status projection of the two slots.
    #[must_use]
    pub const fn state(&self) -> SignatureState {
        match (&self.supplier, &self.customer) {
            (None, None) => SignatureState::NotSigned,
            (None, Some(_)) => SignatureState::AwaitingSupplier,
            (Some(_), None) => SignatureState::AwaitingCustomer,
            (Some(_), Some(_)) => SignatureState::Signed,
        }
    }

    /// Returns true if both sides have signed.
    #[must_use]
    pub const fn is_fully_signed(&self) -> bool {
        matches!(self.state(), SignatureState::Signed)
    }

    /// Returns a copy with `side`'s slot set to `signature`, overwriting
    /// any previous signature in that slot.
    #[must_use]
    pub fn with_signature(&self, side: SignatureSide, signature: Signature) -> Self {
        let mut next = self.clone();
        match side {
            SignatureSide::Supplier => next.supplier = Some(signature),
            SignatureSide::Customer => next.customer = Some(signature),
        }
        next
    }
}
