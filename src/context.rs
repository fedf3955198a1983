use uuid::Uuid;

use crate::models::UserRole;

/// Who is driving the current session. Passed into session and screen
/// constructors explicitly; nothing in the crate reads ambient auth state.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Option<Uuid>,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self {
            user_id: Some(user_id),
            role,
        }
    }

    /// An unauthenticated context, useful for read-only embedding and tests.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: UserRole::ReadOnly,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

/// Deployment-level knobs the editing core needs, injected rather than read
/// from a global.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Asset substituted whenever a stored design has no logo of its own.
    pub placeholder_logo: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            placeholder_logo: "/assets/placeholder-logo.svg".to_string(),
        }
    }
}
