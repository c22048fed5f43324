use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::UserRole;

/// Where unauthenticated sessions are always sent.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Identity facts the gate decides on. Supplied by the identity source,
/// never mutated here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub role: Option<UserRole>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: UserRole) -> Self {
        Self {
            is_authenticated: true,
            role: Some(role),
        }
    }
}

/// Outcome handed to the routing layer, which performs the navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "path", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(path) => Some(path),
        }
    }
}

/// Access gate bound to a configured login path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessGate {
    login_path: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH)
    }
}

impl AccessGate {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decides whether `session` may view a resource restricted to
    /// `required_roles` (treated as a set; empty means any signed-in user).
    ///
    /// The login redirect wins over the role fallback. A session without a
    /// role never satisfies a non-empty role set.
    pub fn authorize(
        &self,
        session: &Session,
        required_roles: &[UserRole],
        fallback_path: &str,
    ) -> Decision {
        if !session.is_authenticated {
            debug!(login_path = %self.login_path, "Unauthenticated session redirected to login");
            return Decision::RedirectTo(self.login_path.clone());
        }

        let permitted = required_roles.is_empty()
            || session
                .role
                .map_or(false, |role| required_roles.contains(&role));

        if permitted {
            Decision::Allow
        } else {
            debug!(
                role = ?session.role,
                required = ?required_roles,
                fallback = %fallback_path,
                "Role not permitted; redirecting to fallback"
            );
            Decision::RedirectTo(fallback_path.to_string())
        }
    }
}

/// [`AccessGate::authorize`] with the default login path.
pub fn authorize(session: &Session, required_roles: &[UserRole], fallback_path: &str) -> Decision {
    AccessGate::default().authorize(session, required_roles, fallback_path)
}
