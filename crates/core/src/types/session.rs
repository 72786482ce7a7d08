//! The per-request session context.

use serde::{Deserialize, Serialize};

use super::{RoleName, UserId};

/// Identity carried by an authenticated session.
///
/// Built once at login from the user row and a role lookup. Handlers receive
/// it through the auth extractors and read nothing else from the session, so
/// role changes take effect on the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub roles: Vec<RoleName>,
}

impl SessionUser {
    /// Create a session context, deduplicating and sorting roles.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, mut roles: Vec<RoleName>) -> Self {
        roles.sort_unstable();
        roles.dedup();
        Self {
            id,
            name: name.into(),
            roles,
        }
    }

    #[must_use]
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Super admins bypass every per-gym check.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(RoleName::SuperAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_normalized() {
        let user = SessionUser::new(
            UserId::new(1),
            "A B",
            vec![RoleName::SuperAdmin, RoleName::Client, RoleName::Client],
        );
        assert_eq!(user.roles, vec![RoleName::Client, RoleName::SuperAdmin]);
        assert!(user.is_super_admin());
        assert!(!user.has_role(RoleName::GymAdmin));
    }

    #[test]
    fn test_client_is_not_super_admin() {
        let user = SessionUser::new(UserId::new(2), "C", vec![RoleName::Client]);
        assert!(!user.is_super_admin());
    }
}
