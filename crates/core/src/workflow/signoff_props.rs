//! Property-based tests for the dual-signature machine.
//!
//! The machine is a 2-of-2 join: the properties below pin down order
//! independence, the slot/state projection, and the role guard.

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use worklane_shared::types::UserId;

use crate::roles::ProjectRole;
use crate::workflow::error::WorkflowError;
use crate::workflow::signoff::SignoffMachine;
use crate::workflow::types::{Signature, SignatureSide, SignatureSlots, SignatureState};

/// Strategy for generating random signatures.
fn arb_signature() -> impl Strategy<Value = Signature> {
    ("[A-Za-z ]{1,30}", any::<u128>()).prop_map(|(name, n)| Signature {
        signer: UserId::from_uuid(Uuid::from_u128(n)),
        signer_name: name,
        signed_at: Utc::now(),
    })
}

/// Strategy for generating a signature side.
fn arb_side() -> impl Strategy<Value = SignatureSide> {
    prop_oneof![Just(SignatureSide::Supplier), Just(SignatureSide::Customer)]
}

/// Strategy for generating random project roles.
fn arb_role() -> impl Strategy<Value = ProjectRole> {
    prop_oneof![
        Just(ProjectRole::Viewer),
        Just(ProjectRole::Contributor),
        Just(ProjectRole::CustomerPm),
        Just(ProjectRole::SupplierPm),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Signing order does not matter: supplier-then-customer and
    /// customer-then-supplier produce identical slots.
    #[test]
    fn prop_signing_is_order_independent(
        supplier_sig in arb_signature(),
        customer_sig in arb_signature(),
    ) {
        let empty = SignatureSlots::default();

        let a = SignoffMachine::sign(
            &empty, SignatureSide::Supplier, ProjectRole::SupplierPm, supplier_sig.clone(),
        ).unwrap();
        let a = SignoffMachine::sign(
            &a.slots, SignatureSide::Customer, ProjectRole::CustomerPm, customer_sig.clone(),
        ).unwrap();

        let b = SignoffMachine::sign(
            &empty, SignatureSide::Customer, ProjectRole::CustomerPm, customer_sig,
        ).unwrap();
        let b = SignoffMachine::sign(
            &b.slots, SignatureSide::Supplier, ProjectRole::SupplierPm, supplier_sig,
        ).unwrap();

        prop_assert_eq!(a.slots, b.slots);
        prop_assert_eq!(a.state, SignatureState::Signed);
        prop_assert!(a.became_fully_signed);
        prop_assert!(b.became_fully_signed);
    }

    /// Only the side's own PM role may sign; every other role is
    /// Forbidden and the slots are untouched.
    #[test]
    fn prop_wrong_role_cannot_sign(
        side in arb_side(),
        role in arb_role(),
        signature in arb_signature(),
    ) {
        prop_assume!(role != side.required_role());
        let err = SignoffMachine::sign(&SignatureSlots::default(), side, role, signature)
            .unwrap_err();
        let forbidden = matches!(err, WorkflowError::Forbidden { .. });
        prop_assert!(forbidden, "expected Forbidden, got {err}");
    }

    /// Signing one side never alters the other side's slot.
    #[test]
    fn prop_signing_touches_one_slot(
        side in arb_side(),
        first in arb_signature(),
        second in arb_signature(),
    ) {
        let slots = SignatureSlots::default()
            .with_signature(side, first);
        let other = match side {
            SignatureSide::Supplier => SignatureSide::Customer,
            SignatureSide::Customer => SignatureSide::Supplier,
        };
        let outcome = SignoffMachine::sign(
            &slots, other, other.required_role(), second,
        ).unwrap();
        match side {
            SignatureSide::Supplier => prop_assert_eq!(outcome.slots.supplier, slots.supplier),
            SignatureSide::Customer => prop_assert_eq!(outcome.slots.customer, slots.customer),
        }
    }

    /// The derived state is always consistent with slot presence.
    #[test]
    fn prop_state_is_slot_projection(
        side in arb_side(),
        signature in arb_signature(),
    ) {
        let outcome = SignoffMachine::sign(
            &SignatureSlots::default(), side, side.required_role(), signature,
        ).unwrap();
        let expected = match side {
            SignatureSide::Supplier => SignatureState::AwaitingCustomer,
            SignatureSide::Customer => SignatureState::AwaitingSupplier,
        };
        prop_assert_eq!(outcome.state, expected);
        prop_assert_eq!(outcome.slots.state(), outcome.state);
        prop_assert!(!outcome.became_fully_signed);
    }

    /// Re-signing before the join completes overwrites the slot; once
    /// both sides have signed, nothing more is accepted.
    #[test]
    fn prop_signed_is_terminal(
        side in arb_side(),
        supplier_sig in arb_signature(),
        customer_sig in arb_signature(),
        late in arb_signature(),
    ) {
        let slots = SignatureSlots::default()
            .with_signature(SignatureSide::Supplier, supplier_sig)
            .with_signature(SignatureSide::Customer, customer_sig);
        let err = SignoffMachine::sign(&slots, side, side.required_role(), late)
            .unwrap_err();
        let invalid = matches!(err, WorkflowError::InvalidTransition { .. });
        prop_assert!(invalid, "expected InvalidTransition, got {err}");
    }
}
