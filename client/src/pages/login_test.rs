use super::*;

#[test]
fn requested_view_parses_guarded_paths() {
    assert_eq!(requested_view(Some("/teacher")), Some(AppRoute::Teacher));
    assert_eq!(requested_view(Some("/register")), Some(AppRoute::Register));
}

#[test]
fn requested_view_ignores_login_and_junk() {
    assert_eq!(requested_view(Some("/")), None);
    assert_eq!(requested_view(Some("/elsewhere")), None);
    assert_eq!(requested_view(None), None);
}

#[test]
fn submit_label_reflects_pending() {
    assert_eq!(submit_label(false), "Login");
    assert_eq!(submit_label(true), "Signing in...");
}
