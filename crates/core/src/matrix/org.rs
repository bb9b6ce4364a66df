//! Organisation-tier permission matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::Action;
use crate::roles::OrgRole;

/// Organisation-tier entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgEntity {
    /// The organisation record itself.
    Organisation,
    /// Organisation membership.
    OrgMembers,
    /// The organisation's project portfolio.
    OrgProjects,
    /// Organisation-wide settings.
    OrgSettings,
}

impl OrgEntity {
    /// All organisation-tier entities.
    pub const ALL: [Self; 4] = [
        Self::Organisation,
        Self::OrgMembers,
        Self::OrgProjects,
        Self::OrgSettings,
    ];

    /// Returns the string representation of the entity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organisation => "organisation",
            Self::OrgMembers => "org_members",
            Self::OrgProjects => "org_projects",
            Self::OrgSettings => "org_settings",
        }
    }
}

impl fmt::Display for OrgEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const MEMBER_UP: &[OrgRole] = &[OrgRole::Member, OrgRole::Admin, OrgRole::Owner];
const ADMIN_UP: &[OrgRole] = &[OrgRole::Admin, OrgRole::Owner];
const OWNER_ONLY: &[OrgRole] = &[OrgRole::Owner];
const NOBODY: &[OrgRole] = &[];

/// Returns the actions defined for an entity.
///
/// Every action referenced anywhere in the engine for this tier appears
/// here; an action outside this list is a configuration error and is
/// denied by [`roles_for`].
#[must_use]
pub const fn actions_for(entity: OrgEntity) -> &'static [Action] {
    match entity {
        OrgEntity::Organisation => &[Action::View, Action::Edit, Action::Delete],
        OrgEntity::OrgMembers => &[Action::View, Action::Invite, Action::Edit, Action::Delete],
        OrgEntity::OrgProjects => &[Action::View, Action::Create, Action::Delete],
        OrgEntity::OrgSettings => &[Action::View, Action::Edit],
    }
}

/// Returns the roles allowed to perform `action` on `entity`.
///
/// Unknown (entity, action) pairs yield the empty set: deny by default.
#[must_use]
pub const fn roles_for(entity: OrgEntity, action: Action) -> &'static [OrgRole] {
    match (entity, action) {
        (OrgEntity::Organisation, Action::View) => MEMBER_UP,
        (OrgEntity::Organisation, Action::Edit) => ADMIN_UP,
        (OrgEntity::Organisation, Action::Delete) => OWNER_ONLY,

        (OrgEntity::OrgMembers, Action::View | Action::Invite | Action::Edit) => ADMIN_UP,
        (OrgEntity::OrgMembers, Action::Delete) => OWNER_ONLY,

        (OrgEntity::OrgProjects, Action::View) => MEMBER_UP,
        (OrgEntity::OrgProjects, Action::Create) => ADMIN_UP,
        (OrgEntity::OrgProjects, Action::Delete) => OWNER_ONLY,

        (OrgEntity::OrgSettings, Action::View) => ADMIN_UP,
        (OrgEntity::OrgSettings, Action::Edit) => OWNER_ONLY,

        _ => NOBODY,
    }
}

/// Returns true if `role` may perform `action` on `entity`.
#[must_use]
pub fn allows(role: OrgRole, entity: OrgEntity, action: Action) -> bool {
    roles_for(entity, action).contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_totality() {
        // Every declared action has a non-empty role set
        for entity in OrgEntity::ALL {
            for &action in actions_for(entity) {
                assert!(
                    !roles_for(entity, action).is_empty(),
                    "empty role set for {entity} / {action}"
                );
            }
        }
    }

    #[test]
    fn test_monotonicity() {
        // A higher role is never denied what a lower role is granted
        for entity in OrgEntity::ALL {
            for &action in actions_for(entity) {
                for low in OrgRole::ALL {
                    for high in OrgRole::ALL {
                        if high.is_at_least(low) && allows(low, entity, action) {
                            assert!(
                                allows(high, entity, action),
                                "{high} denied {action} on {entity} granted to {low}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_entity_is_viewable_by_someone() {
        for entity in OrgEntity::ALL {
            assert!(!roles_for(entity, Action::View).is_empty());
        }
    }

    #[test]
    fn test_deny_by_default_for_undeclared_action() {
        assert!(!allows(OrgRole::Owner, OrgEntity::OrgSettings, Action::Sign));
        assert!(roles_for(OrgEntity::Organisation, Action::Approve).is_empty());
    }

    #[test]
    fn test_destructive_actions_are_owner_only() {
        for entity in OrgEntity::ALL {
            if actions_for(entity).contains(&Action::Delete) {
                assert_eq!(roles_for(entity, Action::Delete), OWNER_ONLY);
            }
        }
    }

    #[test]
    fn test_member_cannot_touch_settings() {
        assert!(!allows(OrgRole::Member, OrgEntity::OrgSettings, Action::View));
        assert!(!allows(OrgRole::Member, OrgEntity::OrgSettings, Action::Edit));
        assert!(allows(OrgRole::Admin, OrgEntity::OrgSettings, Action::View));
        assert!(allows(OrgRole::Owner, OrgEntity::OrgSettings, Action::Edit));
    }
}
