use super::*;

#[test]
fn switch_toggles_staff_dashboards() {
    assert_eq!(dashboard_switch(Some(AppRoute::Teacher)), Some(("Admin Dashboard", AppRoute::Admin)));
    assert_eq!(dashboard_switch(Some(AppRoute::Admin)), Some(("Teacher Dashboard", AppRoute::Teacher)));
}

#[test]
fn no_switch_elsewhere() {
    assert_eq!(dashboard_switch(Some(AppRoute::Student)), None);
    assert_eq!(dashboard_switch(Some(AppRoute::Login)), None);
    assert_eq!(dashboard_switch(None), None);
}
