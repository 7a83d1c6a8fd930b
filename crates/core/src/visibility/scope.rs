//! Principal roles and the visibility scopes they resolve to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to all records.
    Admin,
    /// School-wide read and administrative access.
    Management,
    /// Teaching staff; sees students of classes they teach.
    Staff,
    /// A student; sees only their own records.
    Student,
    /// A parent; sees their children's records.
    Parent,
}

impl Role {
    /// Parses a role from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "management" => Some(Self::Management),
            "staff" => Some(Self::Staff),
            "student" => Some(Self::Student),
            "parent" => Some(Self::Parent),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Management => "management",
            Self::Staff => "staff",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }

    /// Returns true if this role can mutate reference data (years,
    /// classes, subjects, fee schedules) and user profiles.
    #[must_use]
    pub const fn can_manage_records(&self) -> bool {
        matches!(self, Self::Admin | Self::Management)
    }

    /// Returns true if this role can record or update academic results.
    #[must_use]
    pub const fn can_record_results(&self) -> bool {
        matches!(self, Self::Admin | Self::Management | Self::Staff)
    }

    /// Returns true if this role can register fee payments.
    #[must_use]
    pub const fn can_record_payments(&self) -> bool {
        matches!(self, Self::Admin | Self::Management)
    }

    /// Returns true if this role can mark attendance.
    #[must_use]
    pub const fn can_mark_attendance(&self) -> bool {
        matches!(self, Self::Admin | Self::Management | Self::Staff)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated caller with their resolved profile links.
///
/// The profile IDs come from the caller's role-specific profile row;
/// they are `None` when no such profile exists.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    /// Account ID.
    pub user_id: Uuid,
    /// The caller's role.
    pub role: Role,
    /// Staff profile ID, for staff callers.
    pub staff_id: Option<Uuid>,
    /// Student profile ID, for student callers.
    pub student_id: Option<Uuid>,
    /// Parent profile ID, for parent callers.
    pub parent_id: Option<Uuid>,
}

impl Principal {
    /// Creates a principal with no profile links.
    #[must_use]
    pub const fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            staff_id: None,
            student_id: None,
            parent_id: None,
        }
    }
}

/// What a caller is allowed to see.
///
/// Repositories translate the scope into query filters; the engines
/// themselves stay role-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum VisibilityScope {
    /// Every record.
    All,
    /// Records of students in classes this staff member teaches.
    TaughtClasses {
        /// Staff profile ID.
        staff_id: Uuid,
    },
    /// Records of this parent's children.
    OwnChildren {
        /// Parent profile ID.
        parent_id: Uuid,
    },
    /// The caller's own records only.
    SelfOnly {
        /// Account ID.
        user_id: Uuid,
    },
    /// No records at all (missing profile for a scoped role).
    Nothing,
}

impl VisibilityScope {
    /// Resolves the visibility scope for a principal.
    ///
    /// Admin and management see everything. Staff see the classes they
    /// teach, parents their children, students themselves. A scoped role
    /// with no matching profile resolves to `Nothing` rather than leaking
    /// records.
    #[must_use]
    pub const fn resolve(principal: &Principal) -> Self {
        match principal.role {
            Role::Admin | Role::Management => Self::All,
            Role::Staff => match principal.staff_id {
                Some(staff_id) => Self::TaughtClasses { staff_id },
                None => Self::Nothing,
            },
            Role::Parent => match principal.parent_id {
                Some(parent_id) => Self::OwnChildren { parent_id },
                None => Self::Nothing,
            },
            Role::Student => Self::SelfOnly {
                user_id: principal.user_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_and_management_see_all() {
        let user = Uuid::new_v4();
        assert_eq!(
            VisibilityScope::resolve(&Principal::new(user, Role::Admin)),
            VisibilityScope::All
        );
        assert_eq!(
            VisibilityScope::resolve(&Principal::new(user, Role::Management)),
            VisibilityScope::All
        );
    }

    #[test]
    fn test_staff_scope_requires_profile() {
        let user = Uuid::new_v4();
        let staff_id = Uuid::new_v4();

        let mut principal = Principal::new(user, Role::Staff);
        assert_eq!(
            VisibilityScope::resolve(&principal),
            VisibilityScope::Nothing
        );

        principal.staff_id = Some(staff_id);
        assert_eq!(
            VisibilityScope::resolve(&principal),
            VisibilityScope::TaughtClasses { staff_id }
        );
    }

    #[test]
    fn test_parent_scope_covers_children() {
        let user = Uuid::new_v4();
        let parent_id = Uuid::new_v4();

        let mut principal = Principal::new(user, Role::Parent);
        principal.parent_id = Some(parent_id);

        assert_eq!(
            VisibilityScope::resolve(&principal),
            VisibilityScope::OwnChildren { parent_id }
        );
    }

    #[test]
    fn test_student_scope_is_self_only() {
        let user = Uuid::new_v4();
        assert_eq!(
            VisibilityScope::resolve(&Principal::new(user, Role::Student)),
            VisibilityScope::SelfOnly { user_id: user }
        );
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_manage_records());
        assert!(Role::Management.can_manage_records());
        assert!(!Role::Staff.can_manage_records());

        assert!(Role::Staff.can_record_results());
        assert!(!Role::Student.can_record_results());
        assert!(!Role::Parent.can_record_results());

        assert!(Role::Management.can_record_payments());
        assert!(!Role::Staff.can_record_payments());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Admin,
            Role::Management,
            Role::Staff,
            Role::Student,
            Role::Parent,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("principal"), None);
    }
}
