//! Actors and the effective-role resolver.
//!
//! An [`Actor`] is the resolved principal for one authorization check:
//! identity, stored roles, and an optional session-scoped "view as"
//! override. The override is a UI convenience, not a security boundary:
//! it changes which role decisions use, never which data rows the
//! actor's real identity can see, and it is honored only for roles in
//! the configured may-impersonate set. When the actor is not privileged
//! enough the resolver falls back to the real role silently, so a stray
//! override can neither grant nor deny beyond the real role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use worklane_shared::Claims;
use worklane_shared::config::EngineConfig;
use worklane_shared::types::{SessionId, UserId};

use crate::roles::{OrgRole, ProjectRole};

/// A session-scoped role impersonation override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewAsOverride {
    /// The role to impersonate.
    pub role: ProjectRole,
    /// The session the override is scoped to.
    pub session: SessionId,
    /// When the override was activated.
    pub started_at: DateTime<Utc>,
}

/// The resolved principal for one authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's identity.
    pub id: UserId,
    /// The user's stored organisation role, if the org role string was
    /// recognised.
    pub org_role: Option<OrgRole>,
    /// The user's stored role on the project in context, if any.
    pub project_role: Option<ProjectRole>,
    /// An active "view as" override, if any.
    pub view_as: Option<ViewAsOverride>,
}

impl Actor {
    /// Creates an actor with no roles resolved yet.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            org_role: None,
            project_role: None,
            view_as: None,
        }
    }

    /// Sets the organisation role.
    #[must_use]
    pub const fn with_org_role(mut self, role: OrgRole) -> Self {
        self.org_role = Some(role);
        self
    }

    /// Sets the project role.
    #[must_use]
    pub const fn with_project_role(mut self, role: ProjectRole) -> Self {
        self.project_role = Some(role);
        self
    }

    /// Sets a "view as" override.
    #[must_use]
    pub const fn with_view_as(mut self, view_as: ViewAsOverride) -> Self {
        self.view_as = Some(view_as);
        self
    }

    /// Builds an actor from verified token claims plus the session
    /// state the page layer resolved for the project in context.
    ///
    /// An unrecognised org role string in the claims resolves to no org
    /// role, which denies all organisation-tier checks.
    #[must_use]
    pub fn from_claims(
        claims: &Claims,
        project_role: Option<ProjectRole>,
        view_as: Option<ViewAsOverride>,
    ) -> Self {
        let org_role = OrgRole::parse(&claims.role);
        if org_role.is_none() {
            tracing::warn!(role = %claims.role, "unrecognised org role in claims, denying org tier");
        }
        Self {
            id: UserId::from_uuid(claims.sub),
            org_role,
            project_role,
            view_as,
        }
    }

    /// Returns the organisation role used for decisions.
    ///
    /// The org tier has no impersonation; this is the stored role.
    #[must_use]
    pub const fn effective_org_role(&self) -> Option<OrgRole> {
        self.org_role
    }

    /// Returns the project role used for decisions.
    ///
    /// The override applies only when the stored role is in the
    /// configured may-impersonate set; otherwise it is silently ignored
    /// and the stored role is returned.
    #[must_use]
    pub fn effective_project_role(&self, policy: &ImpersonationPolicy) -> Option<ProjectRole> {
        let real = self.project_role?;
        match self.view_as {
            Some(view_as) if policy.allows(real) => Some(view_as.role),
            _ => Some(real),
        }
    }
}

/// The set of project roles allowed to hold a "view as" override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpersonationPolicy {
    may_impersonate: Vec<ProjectRole>,
}

impl ImpersonationPolicy {
    /// Creates a policy from an explicit role set.
    #[must_use]
    pub const fn new(may_impersonate: Vec<ProjectRole>) -> Self {
        Self { may_impersonate }
    }

    /// Builds the policy from configuration.
    ///
    /// Unrecognised role names are dropped with a warning, shrinking
    /// (never widening) the impersonator set.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let may_impersonate = config
            .may_impersonate
            .iter()
            .filter_map(|name| {
                let role = ProjectRole::parse(name);
                if role.is_none() {
                    tracing::warn!(role = %name, "unknown role in may_impersonate, ignoring");
                }
                role
            })
            .collect();
        Self { may_impersonate }
    }

    /// Returns true if `role` may impersonate another role.
    #[must_use]
    pub fn allows(&self, role: ProjectRole) -> bool {
        self.may_impersonate.contains(&role)
    }
}

impl Default for ImpersonationPolicy {
    fn default() -> Self {
        Self::new(vec![ProjectRole::SupplierPm])
    }
}
