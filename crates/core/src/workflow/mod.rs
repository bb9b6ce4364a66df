//! Approval workflows for Worklane.
//!
//! This module implements the four workflow families governing project
//! entities, plus the engine that composes their transition tables with
//! the object-level authorization rules.
//!
//! # Modules
//!
//! - `types` - Status enums and signature slots
//! - `error` - Workflow-specific error types
//! - `approval` - Validate-then-approve machine (timesheets, expenses, variations)
//! - `delivery` - Deliverable review machine
//! - `signoff` - Dual-signature 2-of-2 join (sign-off, certificates)
//! - `invoice` - Invoice submission/payment machine
//! - `engine` - Transition tables composed with guards

pub mod approval;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod invoice;
pub mod signoff;
pub mod types;

#[cfg(test)]
mod approval_props;
#[cfg(test)]
mod signoff_props;

pub use approval::{ApprovalAction, ApprovalMachine};
pub use delivery::{DeliveryAction, DeliveryMachine};
pub use engine::{Transition, WorkflowEngine};
pub use error::WorkflowError;
pub use invoice::{InvoiceAction, InvoiceMachine};
pub use signoff::{SignOutcome, SignoffMachine};
pub use types::{
    ApprovalStatus, DeliveryStatus, InvoiceStatus, Signature, SignatureSide, SignatureSlots,
    SignatureState,
};
