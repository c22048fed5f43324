/*!
 * # Route Access Table
 *
 * Declares the dashboard's routes, which roles may open them and where a
 * refused session is sent. The sidebar navigation is derived from the same
 * table, so a menu entry is shown exactly when the gate would let the
 * session through.
 */

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::debug;

use super::gate::{AccessGate, Decision, Session};
use crate::models::UserRole;

/// Landing page for signed-in users and the default role fallback.
pub const DEFAULT_REDIRECT_PATH: &str = "/dashboard";

/// Who may open a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// No session required.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in users holding one of these roles.
    Roles(Vec<UserRole>),
}

/// Route definition
#[derive(Debug, Clone)]
pub struct Route {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: String,
    pub access: RouteAccess,
    /// Sidebar label, if the route has a menu entry.
    pub nav_label: Option<String>,
}

impl Route {
    fn new(pattern: &str, access: RouteAccess, nav_label: Option<&str>) -> Self {
        Self {
            pattern: pattern.to_string(),
            access,
            nav_label: nav_label.map(str::to_string),
        }
    }

    /// Roles the gate checks; empty for routes open to any signed-in user.
    pub fn required_roles(&self) -> &[UserRole] {
        match &self.access {
            RouteAccess::Roles(roles) => roles,
            RouteAccess::Public | RouteAccess::Authenticated => &[],
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = segments(&self.pattern);
        let mut candidate = segments(path);
        loop {
            match (pattern.next(), candidate.next()) {
                (None, None) => return true,
                (Some(p), Some(c)) if p.starts_with(':') || p == c => continue,
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub label: String,
}

lazy_static! {
    pub static ref ROUTES: Vec<Route> = vec![
        // Public
        Route::new("/login", RouteAccess::Public, None),
        Route::new("/", RouteAccess::Public, None),

        // Any signed-in user
        Route::new("/dashboard", RouteAccess::Authenticated, Some("Dashboard")),
        Route::new("/products", RouteAccess::Authenticated, Some("Products")),
        Route::new("/products/new", RouteAccess::Authenticated, None),
        Route::new("/products/edit/:id", RouteAccess::Authenticated, None),
        Route::new("/inventory", RouteAccess::Authenticated, Some("Inventory")),

        // Admin only
        Route::new("/reports", RouteAccess::Roles(vec![UserRole::Admin]), Some("Reports")),
        Route::new("/settings", RouteAccess::Roles(vec![UserRole::Admin]), Some("Settings")),
    ];
}

/// Resolves paths against [`ROUTES`] and runs the access gate on them.
#[derive(Clone, Debug)]
pub struct RouteTable {
    gate: AccessGate,
    fallback: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(AccessGate::default())
    }
}

impl RouteTable {
    pub fn new(gate: AccessGate) -> Self {
        Self {
            gate,
            fallback: DEFAULT_REDIRECT_PATH.to_string(),
        }
    }

    /// Where sessions refused for their role are sent.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// First route whose pattern matches `path`.
    pub fn get_route(&self, path: &str) -> Option<&'static Route> {
        ROUTES.iter().find(|route| route.matches(path))
    }

    /// Gate decision for `path`, or `None` when no route matches.
    pub fn guard(&self, session: &Session, path: &str) -> Option<Decision> {
        let Some(route) = self.get_route(path) else {
            debug!(path = %path, "No route matches path");
            return None;
        };

        let decision = match route.access {
            RouteAccess::Public => Decision::Allow,
            RouteAccess::Authenticated | RouteAccess::Roles(_) => {
                self.gate
                    .authorize(session, route.required_roles(), &self.fallback)
            }
        };
        Some(decision)
    }

    /// Sidebar entries visible to `role`, in menu order.
    pub fn navigation_for(&self, role: UserRole) -> Vec<NavItem> {
        let session = Session::authenticated(role);
        ROUTES
            .iter()
            .filter_map(|route| {
                let label = route.nav_label.as_ref()?;
                let allowed = self
                    .gate
                    .authorize(&session, route.required_roles(), &self.fallback)
                    .is_allowed();
                allowed.then(|| NavItem {
                    path: route.pattern.clone(),
                    label: label.clone(),
                })
            })
            .collect()
    }
}
