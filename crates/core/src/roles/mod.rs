//! Role registry: the two-tier role model.
//!
//! Roles are immutable configuration, enumerated here as closed types.
//! Each tier has a total privilege ordering; higher roles may do
//! everything lower roles may, except for actions the permission matrix
//! explicitly flags as asymmetric.
//!
//! Deprecated role names from earlier schemes are mapped to current
//! roles through the alias table in `parse`, once, at this boundary.
//! An unrecognised role string parses to `None` so that permission
//! checks degrade to deny rather than panic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tier a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleTier {
    /// Organisation-level roles (membership, projects, settings).
    Organisation,
    /// Project-level roles (timesheets, expenses, deliverables, ...).
    Project,
}

/// Organisation-tier role, ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    /// Regular organisation member.
    Member = 0,
    /// Manages members and projects.
    Admin = 1,
    /// Full control including organisation settings and deletion.
    Owner = 2,
}

impl OrgRole {
    /// All organisation roles, lowest privilege first.
    pub const ALL: [Self; 3] = [Self::Member, Self::Admin, Self::Owner];

    /// Parses a role from a string, applying the deprecated-name alias table.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "member" => Some(Self::Member),
            // "administrator" is the deprecated name from the old org-role scheme
            "admin" | "administrator" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Returns the human-readable label for the role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Admin => "Administrator",
            Self::Owner => "Owner",
        }
    }

    /// Returns the privilege level of the role.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Returns true if this role is at least as privileged as `min`.
    #[must_use]
    pub fn is_at_least(self, min: Self) -> bool {
        self >= min
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project-tier role, ordered from lowest to highest privilege.
///
/// The customer PM validates and approves supplier submissions; the
/// supplier PM manages the project end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Read-only access to shared project artefacts.
    Viewer = 0,
    /// Logs time and expenses, works on deliverables.
    Contributor = 1,
    /// Customer-side project manager.
    CustomerPm = 2,
    /// Supplier-side project manager; full project management.
    SupplierPm = 3,
}

impl ProjectRole {
    /// All project roles, lowest privilege first.
    pub const ALL: [Self; 4] = [
        Self::Viewer,
        Self::Contributor,
        Self::CustomerPm,
        Self::SupplierPm,
    ];

    /// Parses a role from a string, applying the deprecated-name alias table.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "contributor" => Some(Self::Contributor),
            "customer_pm" => Some(Self::CustomerPm),
            // "admin" is the deprecated fifth role from the old project-role scheme
            "supplier_pm" | "admin" => Some(Self::SupplierPm),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Contributor => "contributor",
            Self::CustomerPm => "customer_pm",
            Self::SupplierPm => "supplier_pm",
        }
    }

    /// Returns the human-readable label for the role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Contributor => "Contributor",
            Self::CustomerPm => "Customer PM",
            Self::SupplierPm => "Supplier PM",
        }
    }

    /// Returns the privilege level of the role.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Returns true if this role is at least as privileged as `min`.
    #[must_use]
    pub fn is_at_least(self, min: Self) -> bool {
        self >= min
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A role from either tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "tier", content = "role")]
pub enum Role {
    /// An organisation-tier role.
    Org(OrgRole),
    /// A project-tier role.
    Project(ProjectRole),
}

impl Role {
    /// Returns the tier this role belongs to.
    #[must_use]
    pub const fn tier(self) -> RoleTier {
        match self {
            Self::Org(_) => RoleTier::Organisation,
            Self::Project(_) => RoleTier::Project,
        }
    }

    /// Returns the privilege level within the role's own tier.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Org(r) => r.level(),
            Self::Project(r) => r.level(),
        }
    }

    /// Returns the human-readable label for the role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Org(r) => r.label(),
            Self::Project(r) => r.label(),
        }
    }
}
