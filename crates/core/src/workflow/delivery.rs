//! Deliverable review state machine.
//!
//! A single-approval pipeline: the owning contributor works the item,
//! submits it for customer review, and the review either completes or
//! sends it back for rework. Delivery is a separate supplier-side step
//! after the review completes. The sign-off workflow for a delivered
//! item is the dual-signature machine, not this one.

use std::fmt;

use crate::workflow::types::DeliveryStatus;

/// Actions in the deliverable review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryAction {
    /// The owner starts work on the deliverable.
    Start,
    /// The owner submits the deliverable for review.
    SubmitForReview,
    /// The customer accepts the review.
    ApproveReview,
    /// The customer sends the deliverable back for changes.
    RequestRework,
    /// The owner resumes work after rework was requested.
    Resume,
    /// The supplier delivers a review-complete item.
    Deliver,
}

impl DeliveryAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SubmitForReview => "submit_for_review",
            Self::ApproveReview => "approve_review",
            Self::RequestRework => "request_rework",
            Self::Resume => "resume",
            Self::Deliver => "deliver",
        }
    }

    /// Returns true if performing this action requires a reason.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::RequestRework)
    }
}

impl fmt::Display for DeliveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless transition table for the deliverable review workflow.
pub struct DeliveryMachine;

impl DeliveryMachine {
    /// Returns the state `action` leads to from `from`, or `None` if the
    /// action is not reachable.
    #[must_use]
    pub const fn next(from: DeliveryStatus, action: DeliveryAction) -> Option<DeliveryStatus> {
        match (from, action) {
            (DeliveryStatus::NotStarted, DeliveryAction::Start)
            | (DeliveryStatus::Rework, DeliveryAction::Resume) => {
                Some(DeliveryStatus::InProgress)
            }
            (DeliveryStatus::InProgress, DeliveryAction::SubmitForReview) => {
                Some(DeliveryStatus::AwaitingReview)
            }
            (DeliveryStatus::AwaitingReview, DeliveryAction::ApproveReview) => {
                Some(DeliveryStatus::ReviewComplete)
            }
            (DeliveryStatus::AwaitingReview, DeliveryAction::RequestRework) => {
                Some(DeliveryStatus::Rework)
            }
            (DeliveryStatus::ReviewComplete, DeliveryAction::Deliver) => {
                Some(DeliveryStatus::Delivered)
            }
            _ => None,
        }
    }

    /// Returns the actor-facing actions reachable from `from`.
    #[must_use]
    pub fn actions_from(from: DeliveryStatus) -> Vec<DeliveryAction> {
        match from {
            DeliveryStatus::NotStarted => vec![DeliveryAction::Start],
            DeliveryStatus::InProgress => vec![DeliveryAction::SubmitForReview],
            DeliveryStatus::AwaitingReview => {
                vec![DeliveryAction::ApproveReview, DeliveryAction::RequestRework]
            }
            DeliveryStatus::ReviewComplete => vec![DeliveryAction::Deliver],
            DeliveryStatus::Rework => vec![DeliveryAction::Resume],
            DeliveryStatus::Delivered => Vec::new(),
        }
    }
}
