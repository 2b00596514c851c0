//! Client-side route authorization.
//!
//! DESIGN
//! ======
//! Every protected view declares a [`RoleSet`]. On navigation the UI asks a
//! [`RouteGuard`] for a [`GuardDecision`] against the current [`Session`]:
//! render the view, or redirect. Which roles may stand in for which is a
//! single capability table, [`AccessPolicy`], instead of ad hoc exceptions
//! scattered through the views.
//!
//! The guard is a pure function of (session, requested view). It performs no
//! I/O and never mutates the session.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::role::{Role, RoleSet};
use crate::session::Session;

/// Roles allowed to open the registration view.
pub const REGISTRATION_ROLES: RoleSet = RoleSet::of(&[Role::Teacher, Role::Admin]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Register,
    Student,
    Teacher,
    Admin,
}

impl AppRoute {
    pub const ALL: [AppRoute; 5] =
        [AppRoute::Login, AppRoute::Register, AppRoute::Student, AppRoute::Teacher, AppRoute::Admin];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            AppRoute::Login => "/",
            AppRoute::Register => "/register",
            AppRoute::Student => "/student",
            AppRoute::Teacher => "/teacher",
            AppRoute::Admin => "/admin",
        }
    }

    /// Resolve a location path. Query strings, fragments and a trailing slash
    /// are ignored; anything unrecognized is `None` ("not found").
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Roles the view declares. `None` means the view is public.
    #[must_use]
    pub fn allowed_roles(self) -> Option<RoleSet> {
        match self {
            AppRoute::Login => None,
            AppRoute::Register => Some(REGISTRATION_ROLES),
            AppRoute::Student => Some(RoleSet::of(&[Role::Student])),
            AppRoute::Teacher => Some(RoleSet::of(&[Role::Teacher])),
            AppRoute::Admin => Some(RoleSet::of(&[Role::Admin])),
        }
    }

    /// Default view for a signed-in role.
    #[must_use]
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Student => AppRoute::Student,
            Role::Teacher => AppRoute::Teacher,
            Role::Admin => AppRoute::Admin,
        }
    }
}

impl std::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// ACCESS POLICY
// =============================================================================

/// Per-role capability table: the set of view roles each role may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    student: RoleSet,
    teacher: RoleSet,
    admin: RoleSet,
}

impl AccessPolicy {
    /// Every role reaches only views that name it.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            student: RoleSet::of(&[Role::Student]),
            teacher: RoleSet::of(&[Role::Teacher]),
            admin: RoleSet::of(&[Role::Admin]),
        }
    }

    /// Teachers and admins run the household and may open every dashboard;
    /// a student reaches only student views.
    #[must_use]
    pub const fn homeschool() -> Self {
        Self { student: RoleSet::of(&[Role::Student]), teacher: RoleSet::EVERY, admin: RoleSet::EVERY }
    }

    #[must_use]
    pub const fn capabilities(&self, role: Role) -> RoleSet {
        match role {
            Role::Student => self.student,
            Role::Teacher => self.teacher,
            Role::Admin => self.admin,
        }
    }

    #[must_use]
    pub const fn permits(&self, role: Role, allowed: RoleSet) -> bool {
        self.capabilities(role).intersects(allowed)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::homeschool()
    }
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthorizedForView,
    AuthenticatedWrongRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigate to `to`. `from` is the view originally requested, carried so
    /// the login page can return there afterwards.
    Redirect { to: AppRoute, from: Option<AppRoute> },
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == GuardDecision::Allow
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
    policy: AccessPolicy,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    #[must_use]
    pub fn state(&self, session: &Session, allowed: RoleSet) -> GuardState {
        if !session.is_logged_in() {
            return GuardState::Unauthenticated;
        }
        match session.role() {
            Some(role) if self.policy.permits(role, allowed) => GuardState::AuthorizedForView,
            Some(_) => GuardState::AuthenticatedWrongRole,
            None => GuardState::Unauthenticated,
        }
    }

    /// Decide whether `requested`, declaring `allowed`, may render.
    #[must_use]
    pub fn check(&self, session: &Session, allowed: RoleSet, requested: AppRoute) -> GuardDecision {
        match (self.state(session, allowed), session.role()) {
            (GuardState::AuthorizedForView, _) => GuardDecision::Allow,
            (GuardState::AuthenticatedWrongRole, Some(role)) => {
                GuardDecision::Redirect { to: AppRoute::home_for(role), from: None }
            }
            _ => GuardDecision::Redirect { to: AppRoute::Login, from: Some(requested) },
        }
    }

    /// [`check`](Self::check) using the route's declared roles. Public views
    /// always render, except that a signed-in user on the login view is sent
    /// to their default view.
    #[must_use]
    pub fn check_route(&self, session: &Session, route: AppRoute) -> GuardDecision {
        match route.allowed_roles() {
            Some(allowed) => self.check(session, allowed, route),
            None => match (route, session.is_logged_in(), session.role()) {
                (AppRoute::Login, true, Some(role)) => {
                    GuardDecision::Redirect { to: AppRoute::home_for(role), from: None }
                }
                _ => GuardDecision::Allow,
            },
        }
    }

    /// Where to go after a successful login: the remembered view if the new
    /// session may open it, otherwise the role's default. `None` while
    /// signed out.
    #[must_use]
    pub fn landing_after_login(&self, session: &Session, from: Option<AppRoute>) -> Option<AppRoute> {
        let role = session.role().filter(|_| session.is_logged_in())?;
        let remembered = from
            .filter(|route| *route != AppRoute::Login)
            .filter(|route| self.check_route(session, *route).is_allowed());
        Some(remembered.unwrap_or_else(|| AppRoute::home_for(role)))
    }
}
