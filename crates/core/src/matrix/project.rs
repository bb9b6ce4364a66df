//! Project-tier permission matrix.
//!
//! The project tier has two sides: the supplier delivers, the customer
//! validates and approves. Owner-side actions (a contributor working on
//! their own drafts) and customer-side actions (approving the supplier's
//! work) are deliberately asymmetric in privilege order and are flagged
//! as such via [`is_asymmetric`] so the monotonicity invariant can
//! exempt them explicitly rather than by inference.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::Action;
use crate::roles::ProjectRole;

/// Project-tier entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectEntity {
    /// Time logged against the project.
    Timesheet,
    /// Expense claims, optionally chargeable to the customer.
    Expense,
    /// Project milestones (baseline dual-signature).
    Milestone,
    /// Deliverables (review workflow plus sign-off).
    Deliverable,
    /// Project resources and their rates.
    Resource,
    /// Supplier-side partners.
    Partner,
    /// Contract variations (change orders).
    Variation,
    /// Milestone certificates (dual-signature).
    Certificate,
    /// Invoices, including partner invoices.
    Invoice,
    /// Project membership.
    Users,
    /// Project settings.
    Settings,
}

impl ProjectEntity {
    /// All project-tier entities.
    pub const ALL: [Self; 11] = [
        Self::Timesheet,
        Self::Expense,
        Self::Milestone,
        Self::Deliverable,
        Self::Resource,
        Self::Partner,
        Self::Variation,
        Self::Certificate,
        Self::Invoice,
        Self::Users,
        Self::Settings,
    ];

    /// Returns the string representation of the entity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timesheet => "timesheet",
            Self::Expense => "expense",
            Self::Milestone => "milestone",
            Self::Deliverable => "deliverable",
            Self::Resource => "resource",
            Self::Partner => "partner",
            Self::Variation => "variation",
            Self::Certificate => "certificate",
            Self::Invoice => "invoice",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }

    /// Returns true if this entity's status field is controlled by a
    /// workflow state machine.
    #[must_use]
    pub const fn is_governed(self) -> bool {
        matches!(
            self,
            Self::Timesheet
                | Self::Expense
                | Self::Milestone
                | Self::Deliverable
                | Self::Variation
                | Self::Certificate
                | Self::Invoice
        )
    }
}

impl fmt::Display for ProjectEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use ProjectRole::{Contributor, CustomerPm, SupplierPm, Viewer};

const EVERYONE: &[ProjectRole] = &[Viewer, Contributor, CustomerPm, SupplierPm];
const CONTRIBUTOR_UP: &[ProjectRole] = &[Contributor, CustomerPm, SupplierPm];
const PMS: &[ProjectRole] = &[CustomerPm, SupplierPm];
const SUPPLIER_PM: &[ProjectRole] = &[SupplierPm];
const CUSTOMER_PM: &[ProjectRole] = &[CustomerPm];
const OWNER_SIDE: &[ProjectRole] = &[Contributor, SupplierPm];
const NOBODY: &[ProjectRole] = &[];

/// Returns the actions defined for an entity.
#[must_use]
pub const fn actions_for(entity: ProjectEntity) -> &'static [Action] {
    match entity {
        ProjectEntity::Timesheet => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Submit,
            Action::Validate,
            Action::Approve,
            Action::Reject,
            Action::Manage,
        ],
        ProjectEntity::Expense => &[
            Action::View,
            Action::ViewCostPrice,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Submit,
            Action::Validate,
            Action::Approve,
            Action::Reject,
            Action::Manage,
        ],
        ProjectEntity::Milestone => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Sign,
            Action::Manage,
        ],
        ProjectEntity::Deliverable => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Submit,
            Action::Approve,
            Action::Reject,
            Action::Sign,
            Action::Deliver,
            Action::Manage,
        ],
        ProjectEntity::Resource => &[
            Action::View,
            Action::ViewCostPrice,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Manage,
        ],
        ProjectEntity::Partner => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Manage,
        ],
        ProjectEntity::Variation => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Submit,
            Action::Validate,
            Action::Approve,
            Action::Reject,
            Action::Implement,
            Action::Manage,
        ],
        ProjectEntity::Certificate => &[
            Action::View,
            Action::Create,
            Action::Delete,
            Action::Sign,
            Action::Manage,
        ],
        ProjectEntity::Invoice => &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Submit,
            Action::Approve,
            Action::Reject,
            Action::RecordPayment,
            Action::Manage,
        ],
        ProjectEntity::Users => &[Action::View, Action::Invite, Action::Edit, Action::Delete],
        ProjectEntity::Settings => &[Action::View, Action::Edit],
    }
}

/// Returns the roles allowed to perform `action` on `entity`.
///
/// Unknown (entity, action) pairs yield the empty set: deny by default.
/// Entries flagged by [`is_asymmetric`] are exempt from the privilege
/// monotonicity invariant; everything else is upward-closed.
#[must_use]
pub const fn roles_for(entity: ProjectEntity, action: Action) -> &'static [ProjectRole] {
    match (entity, action) {
        // --- Timesheets: contributors log time, supplier validates, customer approves
        (ProjectEntity::Timesheet, Action::View) => CONTRIBUTOR_UP,
        (
            ProjectEntity::Timesheet,
            Action::Create | Action::Edit | Action::Delete | Action::Submit,
        ) => OWNER_SIDE,
        (ProjectEntity::Timesheet, Action::Validate) => SUPPLIER_PM,
        (ProjectEntity::Timesheet, Action::Approve) => CUSTOMER_PM,
        (ProjectEntity::Timesheet, Action::Reject) => PMS,
        (ProjectEntity::Timesheet, Action::Manage) => SUPPLIER_PM,

        // --- Expenses: validation/approval side depends on chargeability
        (ProjectEntity::Expense, Action::View) => CONTRIBUTOR_UP,
        (ProjectEntity::Expense, Action::ViewCostPrice) => SUPPLIER_PM,
        (
            ProjectEntity::Expense,
            Action::Create | Action::Edit | Action::Delete | Action::Submit,
        ) => OWNER_SIDE,
        (ProjectEntity::Expense, Action::Validate | Action::Approve) => PMS,
        (ProjectEntity::Expense, Action::Reject) => PMS,
        (ProjectEntity::Expense, Action::Manage) => SUPPLIER_PM,

        // --- Milestones: supplier plans, both sides sign the baseline
        (ProjectEntity::Milestone, Action::View) => EVERYONE,
        (ProjectEntity::Milestone, Action::Create | Action::Edit | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Milestone, Action::Sign) => PMS,
        (ProjectEntity::Milestone, Action::Manage) => SUPPLIER_PM,

        // --- Deliverables: supplier side works, customer reviews, both sign off
        (ProjectEntity::Deliverable, Action::View) => EVERYONE,
        (ProjectEntity::Deliverable, Action::Create | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Deliverable, Action::Edit | Action::Submit) => OWNER_SIDE,
        (ProjectEntity::Deliverable, Action::Approve | Action::Reject) => CUSTOMER_PM,
        (ProjectEntity::Deliverable, Action::Sign) => PMS,
        (ProjectEntity::Deliverable, Action::Deliver) => SUPPLIER_PM,
        (ProjectEntity::Deliverable, Action::Manage) => SUPPLIER_PM,

        // --- Resources: internal rates are supplier-confidential
        (ProjectEntity::Resource, Action::View) => PMS,
        (ProjectEntity::Resource, Action::ViewCostPrice) => SUPPLIER_PM,
        (ProjectEntity::Resource, Action::Create | Action::Edit | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Resource, Action::Manage) => SUPPLIER_PM,

        // --- Partners: supplier-internal
        (ProjectEntity::Partner, Action::View) => SUPPLIER_PM,
        (ProjectEntity::Partner, Action::Create | Action::Edit | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Partner, Action::Manage) => SUPPLIER_PM,

        // --- Variations: supplier raises, customer validates/approves
        (ProjectEntity::Variation, Action::View) => PMS,
        (
            ProjectEntity::Variation,
            Action::Create | Action::Edit | Action::Delete | Action::Submit,
        ) => SUPPLIER_PM,
        (ProjectEntity::Variation, Action::Validate | Action::Approve) => CUSTOMER_PM,
        (ProjectEntity::Variation, Action::Reject) => PMS,
        (ProjectEntity::Variation, Action::Implement) => SUPPLIER_PM,
        (ProjectEntity::Variation, Action::Manage) => SUPPLIER_PM,

        // --- Certificates: both sides sign
        (ProjectEntity::Certificate, Action::View) => PMS,
        (ProjectEntity::Certificate, Action::Create | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Certificate, Action::Sign) => PMS,
        (ProjectEntity::Certificate, Action::Manage) => SUPPLIER_PM,

        // --- Invoices: supplier raises, customer approves, supplier records payment
        (ProjectEntity::Invoice, Action::View) => PMS,
        (
            ProjectEntity::Invoice,
            Action::Create | Action::Edit | Action::Delete | Action::Submit,
        ) => SUPPLIER_PM,
        (ProjectEntity::Invoice, Action::Approve | Action::Reject) => CUSTOMER_PM,
        (ProjectEntity::Invoice, Action::RecordPayment) => SUPPLIER_PM,
        (ProjectEntity::Invoice, Action::Manage) => SUPPLIER_PM,

        // --- Project membership and settings
        (ProjectEntity::Users, Action::View) => CONTRIBUTOR_UP,
        (ProjectEntity::Users, Action::Invite | Action::Edit | Action::Delete) => SUPPLIER_PM,
        (ProjectEntity::Settings, Action::View | Action::Edit) => SUPPLIER_PM,

        _ => NOBODY,
    }
}

/// Returns true if `role` may perform `action` on `entity`.
#[must_use]
pub fn allows(role: ProjectRole, entity: ProjectEntity, action: Action) -> bool {
    roles_for(entity, action).contains(&role)
}

/// Returns true if the (entity, action) entry is deliberately
/// asymmetric: granted below the top of the privilege order without
/// being granted above it.
///
/// Owner-side actions (a contributor's own drafts) and customer-side
/// actions (approving the supplier's work) fall in this category; the
/// monotonicity invariant does not apply to them.
#[must_use]
pub const fn is_asymmetric(entity: ProjectEntity, action: Action) -> bool {
    matches!(
        (entity, action),
        (
            ProjectEntity::Timesheet,
            Action::Create | Action::Edit | Action::Delete | Action::Submit | Action::Approve,
        ) | (
            ProjectEntity::Expense,
            Action::Create | Action::Edit | Action::Delete | Action::Submit,
        ) | (
            ProjectEntity::Deliverable,
            Action::Edit | Action::Submit | Action::Approve | Action::Reject,
        ) | (ProjectEntity::Variation, Action::Validate | Action::Approve)
            | (ProjectEntity::Invoice, Action::Approve | Action::Reject)
    )
}
