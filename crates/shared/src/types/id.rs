//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a `ProjectId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(OrganizationId, "Unique identifier for an organisation.");
typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(SessionId, "Unique identifier for a user session.");
typed_id!(TimesheetId, "Unique identifier for a timesheet.");
typed_id!(ExpenseId, "Unique identifier for an expense claim.");
typed_id!(MilestoneId, "Unique identifier for a milestone.");
typed_id!(DeliverableId, "Unique identifier for a deliverable.");
typed_id!(ResourceId, "Unique identifier for a project resource.");
typed_id!(PartnerId, "Unique identifier for a partner.");
typed_id!(VariationId, "Unique identifier for a contract variation.");
typed_id!(CertificateId, "Unique identifier for a milestone certificate.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
