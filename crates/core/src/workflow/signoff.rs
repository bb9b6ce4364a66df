//! Dual-signature machine (deliverable sign-off, milestone
//! certificates).
//!
//! Two independent slots, one per side; the document status is a pure
//! projection of which slots are filled. This is a 2-of-2 join, not a
//! sequence: either side may sign first, and until the join completes a
//! side may re-sign to overwrite its own slot.

use crate::roles::ProjectRole;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{Signature, SignatureSide, SignatureSlots, SignatureState};

/// The result of an accepted signature.
///
/// Carries the updated slots for the caller to persist, plus the
/// derived state so the caller does not recompute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutcome {
    /// The slots after signing.
    pub slots: SignatureSlots,
    /// The derived state after signing.
    pub state: SignatureState,
    /// True if this signature completed the 2-of-2 join. Callers use
    /// this to fire the one-time "fully signed" side effects.
    pub became_fully_signed: bool,
}

/// Stateless service for dual-signature documents.
pub struct SignoffMachine;

impl SignoffMachine {
    /// Records `signature` in `side`'s slot.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if the document is already fully signed.
    /// * `Forbidden` if `role` is not the PM role for `side`.
    pub fn sign(
        slots: &SignatureSlots,
        side: SignatureSide,
        role: ProjectRole,
        signature: Signature,
    ) -> Result<SignOutcome, WorkflowError> {
        if slots.is_fully_signed() {
            return Err(WorkflowError::invalid(
                slots.state().as_str(),
                format!("sign_{side}"),
            ));
        }
        if role != side.required_role() {
            return Err(WorkflowError::forbidden(role.as_str(), format!("sign_{side}")));
        }

        let next = slots.with_signature(side, signature);
        let state = next.state();
        Ok(SignOutcome {
            became_fully_signed: state == SignatureState::Signed,
            slots: next,
            state,
        })
    }

    /// Returns the sides still awaiting a signature.
    #[must_use]
    pub fn pending_sides(slots: &SignatureSlots) -> Vec<SignatureSide> {
        let mut pending = Vec::with_capacity(2);
        if slots.supplier.is_none() {
            pending.push(SignatureSide::Supplier);
        }
        if slots.customer.is_none() {
            pending.push(SignatureSide::Customer);
        }
        pending
    }
}
