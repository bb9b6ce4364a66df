//! Permission matrix: static (entity, action) → roles tables.
//!
//! Two independent matrices exist side by side, one per tier. A role
//! belongs to exactly one tier's vocabulary; the decision facade picks
//! the matrix from the entity's tier. Lookups are pure; anything not in
//! a table is denied (the engine never fails open).
//!
//! # Modules
//!
//! - `org` - Organisation-tier matrix
//! - `project` - Project-tier matrix

pub mod org;
pub mod project;

pub use org::OrgEntity;
pub use project::ProjectEntity;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action a role may be granted on an entity type.
///
/// Actions are entity-specific; each entity declares its action set in
/// its matrix table. Confidential attributes use the distinct
/// `ViewCostPrice` action rather than overloading `View`, so a role can
/// see an entity without seeing its sensitive fields. `Manage` marks the
/// full-management role set consulted by the object-level rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// View the entity.
    View,
    /// View confidential cost/margin fields.
    ViewCostPrice,
    /// Create a new instance.
    Create,
    /// Edit an instance.
    Edit,
    /// Delete an instance.
    Delete,
    /// Submit for validation/approval.
    Submit,
    /// Validate a submitted instance.
    Validate,
    /// Approve a validated (or submitted) instance.
    Approve,
    /// Reject back towards draft.
    Reject,
    /// Sign one side of a dual-signature document.
    Sign,
    /// Mark a reviewed deliverable as delivered.
    Deliver,
    /// Mark an approved variation as implemented.
    Implement,
    /// Invite a user.
    Invite,
    /// Record a payment against an invoice.
    RecordPayment,
    /// Full management of the entity, regardless of ownership.
    Manage,
}

impl Action {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::ViewCostPrice => "view_cost_price",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Submit => "submit",
            Self::Validate => "validate",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Sign => "sign",
            Self::Deliver => "deliver",
            Self::Implement => "implement",
            Self::Invite => "invite",
            Self::RecordPayment => "record_payment",
            Self::Manage => "manage",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(Self::View),
            "view_cost_price" => Some(Self::ViewCostPrice),
            "create" => Some(Self::Create),
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            "submit" => Some(Self::Submit),
            "validate" => Some(Self::Validate),
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "sign" => Some(Self::Sign),
            "deliver" => Some(Self::Deliver),
            "implement" => Some(Self::Implement),
            "invite" => Some(Self::Invite),
            "record_payment" => Some(Self::RecordPayment),
            "manage" => Some(Self::Manage),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
