//! Header navigation between the two staff dashboards.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use crate::guard::AppRoute;

/// Label and target of the dashboard switch button, shown only on the
/// teacher and admin dashboards.
#[must_use]
pub fn dashboard_switch(current: Option<AppRoute>) -> Option<(&'static str, AppRoute)> {
    match current? {
        AppRoute::Teacher => Some(("Admin Dashboard", AppRoute::Admin)),
        AppRoute::Admin => Some(("Teacher Dashboard", AppRoute::Teacher)),
        _ => None,
    }
}
