use super::*;

fn signed_in(role: Role) -> Session {
    Session::authenticated("abc", role, 1)
}

fn only(role: Role) -> RoleSet {
    RoleSet::of(&[role])
}

// =============================================================
// AppRoute
// =============================================================

#[test]
fn paths_round_trip() {
    for route in AppRoute::ALL {
        assert_eq!(AppRoute::from_path(route.path()), Some(route));
    }
}

#[test]
fn from_path_ignores_trailing_slash_and_query() {
    assert_eq!(AppRoute::from_path("/teacher/"), Some(AppRoute::Teacher));
    assert_eq!(AppRoute::from_path("/student?tab=1"), Some(AppRoute::Student));
    assert_eq!(AppRoute::from_path(""), Some(AppRoute::Login));
    assert_eq!(AppRoute::from_path("/nowhere"), None);
}

#[test]
fn home_views_match_roles() {
    assert_eq!(AppRoute::home_for(Role::Student), AppRoute::Student);
    assert_eq!(AppRoute::home_for(Role::Teacher), AppRoute::Teacher);
    assert_eq!(AppRoute::home_for(Role::Admin), AppRoute::Admin);
}

#[test]
fn login_is_public_and_register_is_guarded() {
    assert_eq!(AppRoute::Login.allowed_roles(), None);
    assert_eq!(AppRoute::Register.allowed_roles(), Some(REGISTRATION_ROLES));
    assert!(!REGISTRATION_ROLES.contains(Role::Student));
}

// =============================================================
// AccessPolicy
// =============================================================

#[test]
fn homeschool_policy_elevates_teacher_and_admin() {
    let policy = AccessPolicy::homeschool();
    for view in Role::ALL {
        assert!(policy.permits(Role::Teacher, only(view)));
        assert!(policy.permits(Role::Admin, only(view)));
    }
    assert!(policy.permits(Role::Student, only(Role::Student)));
    assert!(!policy.permits(Role::Student, only(Role::Teacher)));
    assert!(!policy.permits(Role::Student, only(Role::Admin)));
}

#[test]
fn strict_policy_has_no_elevation() {
    let policy = AccessPolicy::strict();
    assert!(!policy.permits(Role::Teacher, only(Role::Student)));
    assert!(!policy.permits(Role::Admin, only(Role::Teacher)));
    assert!(policy.permits(Role::Admin, only(Role::Admin)));
}

#[test]
fn empty_allowed_set_admits_nobody() {
    let policy = AccessPolicy::homeschool();
    for role in Role::ALL {
        assert!(!policy.permits(role, RoleSet::EMPTY));
    }
}

// =============================================================
// RouteGuard::check
// =============================================================

#[test]
fn student_on_teacher_view_is_redirected_home() {
    let guard = RouteGuard::default();
    let decision = guard.check(&signed_in(Role::Student), only(Role::Teacher), AppRoute::Teacher);
    assert_eq!(decision, GuardDecision::Redirect { to: AppRoute::Student, from: None });
    assert_eq!(guard.state(&signed_in(Role::Student), only(Role::Teacher)), GuardState::AuthenticatedWrongRole);
}

#[test]
fn teacher_on_student_view_is_allowed() {
    let guard = RouteGuard::default();
    let decision = guard.check(&signed_in(Role::Teacher), only(Role::Student), AppRoute::Student);
    assert_eq!(decision, GuardDecision::Allow);
}

#[test]
fn teacher_on_student_view_is_redirected_under_strict() {
    let guard = RouteGuard::new(AccessPolicy::strict());
    let decision = guard.check(&signed_in(Role::Teacher), only(Role::Student), AppRoute::Student);
    assert_eq!(decision, GuardDecision::Redirect { to: AppRoute::Teacher, from: None });
}

#[test]
fn anonymous_is_sent_to_login_regardless_of_roles() {
    let guard = RouteGuard::default();
    let anonymous = Session::default();
    for allowed in [RoleSet::EMPTY, RoleSet::EVERY, only(Role::Student)] {
        assert_eq!(
            guard.check(&anonymous, allowed, AppRoute::Admin),
            GuardDecision::Redirect { to: AppRoute::Login, from: Some(AppRoute::Admin) }
        );
        assert_eq!(guard.state(&anonymous, allowed), GuardState::Unauthenticated);
    }
}

// =============================================================
// RouteGuard::check_route
// =============================================================

#[test]
fn login_view_is_open_to_anonymous() {
    let guard = RouteGuard::default();
    assert!(guard.check_route(&Session::default(), AppRoute::Login).is_allowed());
}

#[test]
fn signed_in_user_on_login_goes_home() {
    let guard = RouteGuard::default();
    assert_eq!(
        guard.check_route(&signed_in(Role::Admin), AppRoute::Login),
        GuardDecision::Redirect { to: AppRoute::Admin, from: None }
    );
}

#[test]
fn register_requires_teacher_or_admin() {
    let guard = RouteGuard::default();
    assert!(guard.check_route(&signed_in(Role::Teacher), AppRoute::Register).is_allowed());
    assert!(guard.check_route(&signed_in(Role::Admin), AppRoute::Register).is_allowed());
    assert_eq!(
        guard.check_route(&signed_in(Role::Student), AppRoute::Register),
        GuardDecision::Redirect { to: AppRoute::Student, from: None }
    );
    assert_eq!(
        guard.check_route(&Session::default(), AppRoute::Register),
        GuardDecision::Redirect { to: AppRoute::Login, from: Some(AppRoute::Register) }
    );
}

// =============================================================
// landing_after_login
// =============================================================

#[test]
fn landing_returns_to_remembered_view_when_allowed() {
    let guard = RouteGuard::default();
    let teacher = signed_in(Role::Teacher);
    assert_eq!(guard.landing_after_login(&teacher, Some(AppRoute::Admin)), Some(AppRoute::Admin));
}

#[test]
fn landing_falls_back_to_home_when_remembered_view_is_denied() {
    let guard = RouteGuard::default();
    let student = signed_in(Role::Student);
    assert_eq!(guard.landing_after_login(&student, Some(AppRoute::Teacher)), Some(AppRoute::Student));
    assert_eq!(guard.landing_after_login(&student, None), Some(AppRoute::Student));
    assert_eq!(guard.landing_after_login(&student, Some(AppRoute::Login)), Some(AppRoute::Student));
}

#[test]
fn landing_is_none_while_signed_out() {
    let guard = RouteGuard::default();
    assert_eq!(guard.landing_after_login(&Session::default(), Some(AppRoute::Student)), None);
}
